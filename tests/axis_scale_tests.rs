use approx::assert_relative_eq;
use graph_axis::GraphError;
use graph_axis::core::{
    BoundPolicy, ScaleRequest, TickStep, generate_ticks, scale_linear, scale_log,
};

#[test]
fn loose_linear_axis_extends_to_outer_ticks() {
    let request = ScaleRequest::new(0.0, 97.0).with_loose(BoundPolicy::Loose);
    let scale = scale_linear(&request).expect("valid scale");

    assert_eq!(scale.major.step, TickStep::Linear(20.0));
    assert_eq!(scale.range.min, 0.0);
    assert_eq!(scale.range.max, 100.0);
    assert_eq!(
        generate_ticks(&scale.major),
        vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
    );
    assert_eq!(generate_ticks(&scale.minor), vec![0.5]);
}

#[test]
fn tight_linear_axis_hugs_the_data() {
    let scale = scale_linear(&ScaleRequest::new(0.0, 97.0)).expect("valid scale");
    assert_eq!((scale.range.min, scale.range.max), (0.0, 97.0));
    assert_eq!(scale.major.count, 6);
}

#[test]
fn loose_bound_is_ignored_for_requested_limits() {
    let request = ScaleRequest::new(0.0, 97.0)
        .with_loose(BoundPolicy::Loose)
        .with_requested(false, true);
    let scale = scale_linear(&request).expect("valid scale");
    assert_eq!((scale.range.min, scale.range.max), (0.0, 97.0));

    let always = ScaleRequest::new(0.0, 97.0)
        .with_loose(BoundPolicy::AlwaysLoose)
        .with_requested(true, true);
    let scale = scale_linear(&always).expect("valid scale");
    assert_eq!((scale.range.min, scale.range.max), (0.0, 100.0));
}

#[test]
fn log_axis_gets_one_major_per_decade() {
    let scale = scale_log(&ScaleRequest::new(1.0, 50_000.0)).expect("valid scale");

    assert_eq!(
        generate_ticks(&scale.major),
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]
    );
    assert_eq!(scale.minor.step, TickStep::LogDecade);
    assert_eq!(scale.minor.count, 9);
    assert_eq!(scale.range.min, 0.0);
    assert_relative_eq!(scale.range.max, 50_000_f64.log10());
}

#[test]
fn wide_log_axis_steps_through_decades() {
    let scale = scale_log(&ScaleRequest::new(1e-3, 1e12)).expect("valid scale");

    assert_eq!(scale.major.step, TickStep::Linear(5.0));
    assert_eq!(generate_ticks(&scale.major), vec![-5.0, 0.0, 5.0, 10.0, 15.0]);
    assert_eq!(scale.minor.step, TickStep::Linear(0.2));
    assert_eq!(scale.minor.count, 4);
}

#[test]
fn explicit_step_is_halved_until_two_ticks_fit() {
    let request = ScaleRequest::new(0.0, 10.0).with_step(20.0);
    let scale = scale_linear(&request).expect("valid scale");
    assert_eq!(scale.major.step, TickStep::Linear(2.5));
    assert_eq!(scale.major.count, 5);
}

#[test]
fn tiny_explicit_step_reports_too_many_ticks() {
    let request = ScaleRequest::new(0.0, 1e6).with_step(0.01);
    let err = scale_linear(&request).expect_err("tick limit");
    assert!(matches!(err, GraphError::TooManyTicks { .. }));
}

#[test]
fn degenerate_span_is_widened_around_the_value() {
    let scale = scale_linear(&ScaleRequest::new(5.0, 5.0)).expect("valid scale");
    assert_eq!((scale.range.min, scale.range.max), (4.5, 5.5));
    assert!(scale.range.contains(5.0));
}

#[test]
fn non_finite_bounds_are_invalid() {
    let err = scale_linear(&ScaleRequest::new(f64::NAN, 1.0)).expect_err("invalid");
    assert!(matches!(err, GraphError::InvalidRange(_)));
    assert!(scale_log(&ScaleRequest::new(1.0, f64::INFINITY)).is_err());
}

#[test]
fn minor_subdivisions_only_follow_generated_majors() {
    let mut request = ScaleRequest::new(0.0, 97.0).with_minor_subdivisions(4);
    let scale = scale_linear(&request).expect("valid scale");
    assert_eq!(generate_ticks(&scale.minor), vec![0.25, 0.5, 0.75]);

    request.auto_major = false;
    let scale = scale_linear(&request).expect("valid scale");
    assert!(scale.minor.is_empty());
}
