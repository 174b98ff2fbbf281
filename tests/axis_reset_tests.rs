use approx::assert_relative_eq;
use graph_axis::api::{AxisPair, BarMode, Element};
use graph_axis::core::{AxisClass, BoundPolicy, Viewport};
use graph_axis::{AxisOptions, Graph, GraphConfig, GraphError};

fn config() -> GraphConfig {
    GraphConfig::new(Viewport::new(600, 400))
}

fn sample_line() -> Element {
    Element::line("a", vec![0.0, 50.0, 97.0], vec![-3.0, 12.0, 40.0])
}

#[test]
fn reset_folds_element_extents_into_default_axes() {
    let mut graph = Graph::new(config()).expect("graph");
    assert!(graph.needs_reset());
    graph.update(&[sample_line()]).expect("update");

    assert!(!graph.needs_reset());
    assert_eq!(graph.axis_limits("x").expect("x"), (0.0, 97.0));
    assert_eq!(graph.axis_limits("y").expect("y"), (-3.0, 40.0));
    let x = graph.axis("x").expect("x");
    assert_eq!(x.data_range().min, 0.0);
    assert_eq!(x.data_range().max, 97.0);
}

#[test]
fn conflicting_limits_fall_back_to_auto_range() {
    let mut plain = Graph::new(config()).expect("graph");
    plain.update(&[sample_line()]).expect("update");

    let mut graph = Graph::new(config()).expect("graph");
    graph
        .configure_axis(
            "x",
            AxisOptions::default().with_limits(Some(10.0), Some(5.0)),
        )
        .expect("conflicting limits are dropped, not rejected");
    graph.update(&[sample_line()]).expect("update");

    assert_eq!(graph.axis("x").expect("x").options().min, None);
    assert_eq!(graph.axis("x").expect("x").options().max, None);
    assert_eq!(
        graph.axis_limits("x").expect("x"),
        plain.axis_limits("x").expect("x")
    );
}

#[test]
fn loose_axis_extends_to_ticks() {
    let mut graph = Graph::new(config()).expect("graph");
    graph
        .configure_axis("x", AxisOptions::default().with_loose(BoundPolicy::Loose))
        .expect("configure");
    graph.update(&[sample_line()]).expect("update");
    assert_eq!(graph.axis_limits("x").expect("x"), (0.0, 100.0));
    assert_eq!(
        graph.axis("x").expect("x").major_ticks(),
        &[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
    );
}

#[test]
fn hidden_elements_do_not_contribute() {
    let mut graph = Graph::new(config()).expect("graph");
    let hidden = Element::line("b", vec![-500.0, 500.0], vec![0.0, 1.0]).with_hidden(true);
    graph.update(&[sample_line(), hidden]).expect("update");
    assert_eq!(graph.axis_limits("x").expect("x"), (0.0, 97.0));
}

#[test]
fn elements_on_unknown_axes_are_skipped() {
    let mut graph = Graph::new(config()).expect("graph");
    let stray = Element::line("b", vec![-500.0, 500.0], vec![0.0, 1.0])
        .with_axes(AxisPair::new("missing", "y"));
    graph.update(&[sample_line(), stray]).expect("unknown axes are not fatal");
    assert_eq!(graph.axis_limits("x").expect("x"), (0.0, 97.0));
}

#[test]
fn stacked_bars_bound_the_y_axis_by_their_sums() {
    let bars = [
        Element::bar("a", 0.5, vec![1.0, 2.0], vec![3.0, 4.0]),
        Element::bar("b", 0.5, vec![1.0], vec![5.0]),
    ];

    let mut stacked = Graph::new(config().with_bar_mode(BarMode::Stacked)).expect("graph");
    stacked.update(&bars).expect("update");
    assert_eq!(stacked.axis_limits("y").expect("y"), (0.0, 8.0));
    assert_eq!(stacked.axis_limits("x").expect("x"), (0.75, 2.25));
    assert_eq!(
        stacked.bar_stacks().sum(&AxisPair::default(), 1.0),
        Some(8.0)
    );

    let mut normal = Graph::new(config()).expect("graph");
    normal.update(&bars).expect("update");
    assert_eq!(normal.axis_limits("y").expect("y"), (0.0, 5.0));
    assert!(normal.bar_stacks().is_empty());
}

#[test]
fn failed_configure_keeps_previous_state() {
    let mut graph = Graph::new(config()).expect("graph");
    let wide = Element::line("a", vec![0.0, 1e6], vec![0.0, 1.0]);
    graph.update(&[wide]).expect("update");
    let before = graph.axis("x").expect("x").clone();

    let err = graph
        .configure_axis("x", AxisOptions::default().with_step(0.001))
        .expect_err("too many ticks");
    assert!(matches!(err, GraphError::TooManyTicks { .. }));

    let after = graph.axis("x").expect("x");
    assert_eq!(after.options().step, None);
    assert_eq!(after.major_ticks(), before.major_ticks());
    assert_eq!(after.limits(), before.limits());
}

#[test]
fn data_outgrowing_an_explicit_step_uses_automatic_ticks() {
    let mut graph = Graph::new(config()).expect("graph");
    graph
        .configure_axis("x", AxisOptions::default().with_step(1.0))
        .expect("configure");
    let narrow = Element::line("a", vec![0.0, 100.0], vec![0.0, 1.0]);
    graph.update(&[narrow.clone()]).expect("update");
    assert_eq!(graph.axis("x").expect("x").major_ticks().len(), 101);

    graph.mark_ranges_dirty();
    let wide = Element::line("a", vec![0.0, 1e6], vec![0.0, 500.0]);
    graph.update(&[wide]).expect("data growth keeps the reset running");
    assert!(!graph.needs_reset());
    assert_eq!(graph.axis_limits("x").expect("x"), (0.0, 1e6));
    assert_eq!(graph.axis_limits("y").expect("y"), (0.0, 500.0));
    let x = graph.axis("x").expect("x");
    assert_eq!(x.options().step, Some(1.0));
    assert!(x.major_ticks().len() <= 10);

    graph.mark_ranges_dirty();
    graph.update(&[narrow]).expect("update");
    assert_eq!(graph.axis("x").expect("x").major_ticks().len(), 101);
}

#[test]
fn log_axis_ticks_cover_whole_decades() {
    let mut graph = Graph::new(config()).expect("graph");
    graph
        .configure_axis("y", AxisOptions::default().with_log_scale(true))
        .expect("configure");
    let data = Element::line("a", vec![0.0, 1.0, 2.0], vec![1.0, 300.0, 50_000.0]);
    graph.update(&[data]).expect("update");

    let y = graph.axis("y").expect("y");
    assert_eq!(y.major_ticks(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let (min, max) = y.limits();
    assert_relative_eq!(min, 1.0);
    assert_relative_eq!(max, 50_000.0, max_relative = 1e-12);
    assert!(y.minor_ticks().iter().all(|tick| y.range().contains(*tick)));
}

#[test]
fn log_axis_ignores_non_positive_samples() {
    let mut graph = Graph::new(config()).expect("graph");
    graph
        .configure_axis("y", AxisOptions::default().with_log_scale(true))
        .expect("configure");
    let data = Element::line("a", vec![0.0, 1.0, 2.0], vec![-4.0, 10.0, 1000.0]);
    graph.update(&[data]).expect("update");
    let (min, max) = graph.axis_limits("y").expect("y");
    assert_relative_eq!(min, 10.0, max_relative = 1e-12);
    assert_relative_eq!(max, 1000.0, max_relative = 1e-12);
}

#[test]
fn non_positive_log_limit_is_rejected_when_checked() {
    let mut graph = Graph::new(config()).expect("graph");
    let options = AxisOptions {
        check_limits: true,
        ..AxisOptions::default().with_log_scale(true).with_limits(Some(0.0), None)
    };
    let err = graph.configure_axis("y", options).expect_err("bad log limit");
    assert!(matches!(err, GraphError::InvalidRange(_)));

    let lenient = AxisOptions::default()
        .with_log_scale(true)
        .with_limits(Some(-1.0), Some(100.0));
    graph.configure_axis("y", lenient).expect("dropped, not rejected");
    assert_eq!(graph.axis("y").expect("y").options().min, None);
}

#[test]
fn auto_scroll_window_follows_newest_data() {
    let mut graph = Graph::new(config()).expect("graph");
    graph
        .configure_axis("x", AxisOptions::default().with_window(10.0, 5.0))
        .expect("configure");
    let data = Element::line("a", vec![0.0, 23.0], vec![0.0, 1.0]);
    graph.update(&[data]).expect("update");
    assert_eq!(graph.axis_limits("x").expect("x"), (15.0, 25.0));
}

#[test]
fn scroll_limits_clamp_the_range() {
    let mut graph = Graph::new(config()).expect("graph");
    graph
        .configure_axis(
            "x",
            AxisOptions::default().with_scroll_limits(Some(10.0), None),
        )
        .expect("configure");
    let data = Element::line("a", vec![0.0, 100.0], vec![0.0, 1.0]);
    graph.update(&[data]).expect("update");
    assert_eq!(graph.axis_limits("x").expect("x"), (10.0, 100.0));
}

#[test]
fn dirty_flag_tracks_limit_changes() {
    let mut graph = Graph::new(config()).expect("graph");
    let data = [sample_line()];
    graph.update(&data).expect("update");
    assert!(graph.axis("x").expect("x").is_dirty());

    graph.mark_ranges_dirty();
    graph.update(&data).expect("update");
    assert!(!graph.axis("x").expect("x").is_dirty());
    assert!(!graph.needs_reset());
}

#[test]
fn empty_graph_gets_unit_ranges() {
    let mut graph = Graph::new(config()).expect("graph");
    graph.update::<Element>(&[]).expect("update");
    assert_eq!(graph.axis_limits("x").expect("x"), (0.0, 1.0));
    assert_eq!(graph.axis_limits("y").expect("y"), (0.0, 1.0));
}

#[test]
fn new_axes_mark_the_graph_dirty() {
    let mut graph = Graph::new(config()).expect("graph");
    graph.update::<Element>(&[]).expect("update");
    assert!(!graph.needs_reset());
    graph
        .create_axis("y3", AxisClass::Y, AxisOptions::default())
        .expect("create");
    assert!(graph.needs_reset());
}
