use graph_axis::api::{BarMode, Element, LayoutStrategy, MarginRequest};
use graph_axis::core::{BoundPolicy, Viewport};
use graph_axis::telemetry::init_default_tracing;
use graph_axis::{AxisOptions, Graph, GraphConfig, GraphError};

#[test]
fn graph_config_json_round_trip() {
    let config = GraphConfig::new(Viewport::new(640, 480))
        .with_title("Latency")
        .with_aspect(1.5)
        .with_stack_axes(true)
        .with_bar_mode(BarMode::Stacked)
        .with_layout_strategy(LayoutStrategy::Converge { max_iterations: 4 })
        .with_margins(MarginRequest {
            left: Some(40.0),
            ..MarginRequest::default()
        });

    let json = config.to_json_pretty().expect("serialize");
    let parsed = GraphConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn empty_json_object_yields_defaults() {
    let parsed = GraphConfig::from_json_str("{}").expect("parse");
    assert_eq!(parsed, GraphConfig::default());
    assert_eq!(parsed.inset, 2.0);
    assert_eq!(parsed.plot_border_width, 1.0);
    assert_eq!(parsed.title_font.size_px, 14.0);
}

#[test]
fn malformed_json_is_an_invalid_config() {
    let err = GraphConfig::from_json_str("not json").expect_err("parse error");
    assert!(matches!(err, GraphError::InvalidConfig(message) if message.contains("parse")));
}

#[test]
fn axis_options_fill_in_defaults() {
    let options = AxisOptions::from_json_str(r#"{ "log_scale": true, "loose_max": "Loose" }"#)
        .expect("parse");
    assert!(options.log_scale);
    assert_eq!(options.loose_max, BoundPolicy::Loose);
    assert_eq!(options.loose_min, BoundPolicy::Tight);
    assert_eq!(options.major_tick_count, 4);
    assert_eq!(options.minor_subdivisions, 2);
    assert_eq!(options.scroll_units, 10.0);
    assert!(options.show_ticks);

    let json = options.to_json_pretty().expect("serialize");
    assert_eq!(AxisOptions::from_json_str(&json).expect("parse"), options);
}

#[test]
fn invalid_graph_config_is_rejected() {
    let bad_aspect = GraphConfig::default().with_aspect(-1.0);
    assert!(matches!(
        Graph::new(bad_aspect),
        Err(GraphError::InvalidConfig(_))
    ));

    let mut graph = Graph::new(GraphConfig::default()).expect("graph");
    let no_iterations =
        GraphConfig::default().with_layout_strategy(LayoutStrategy::Converge { max_iterations: 0 });
    assert!(graph.set_config(no_iterations).is_err());
    assert_eq!(graph.config(), &GraphConfig::default());
}

#[test]
fn layout_serializes_for_debugging() {
    let mut graph = Graph::new(GraphConfig::new(Viewport::new(320, 240))).expect("graph");
    graph
        .update(&[Element::line("a", vec![0.0, 1.0], vec![0.0, 1.0])])
        .expect("update");
    let json = graph.layout_json().expect("serialize");
    assert!(json.contains("\"plot\""));
    assert!(json.contains("\"margins\""));
}

#[test]
fn default_tracing_respects_feature_flag() {
    let installed = init_default_tracing();
    if cfg!(feature = "telemetry") {
        // A second install always fails: the global subscriber is set once.
        assert!(!init_default_tracing() || !installed);
    } else {
        assert!(!installed);
    }
}
