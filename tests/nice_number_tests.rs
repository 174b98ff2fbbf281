use graph_axis::GraphError;
use graph_axis::core::{exp10, nice_number};

#[test]
fn rounding_snaps_to_nearest_nice_fraction() {
    assert_eq!(nice_number(1.4, true).expect("nice"), 1.0);
    assert_eq!(nice_number(1.6, true).expect("nice"), 2.0);
    assert_eq!(nice_number(3.1, true).expect("nice"), 5.0);
    assert_eq!(nice_number(7.1, true).expect("nice"), 10.0);
    assert_eq!(nice_number(0.025, true).expect("nice"), 0.02);
}

#[test]
fn ceiling_rounds_up_to_next_nice_fraction() {
    assert_eq!(nice_number(1.2, false).expect("nice"), 2.0);
    assert_eq!(nice_number(2.5, false).expect("nice"), 5.0);
    assert_eq!(nice_number(97.0, false).expect("nice"), 100.0);
    assert_eq!(nice_number(1000.0, false).expect("nice"), 1000.0);
}

#[test]
fn major_step_for_zero_to_ninety_seven_is_twenty() {
    let range = nice_number(97.0, false).expect("range");
    let step = nice_number(range / 4.0, true).expect("step");
    assert_eq!(step, 20.0);
}

#[test]
fn non_positive_and_non_finite_inputs_are_rejected() {
    for value in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        let err = nice_number(value, true).expect_err("must fail");
        assert!(matches!(err, GraphError::InvalidRange(_)), "{value}");
    }
}

#[test]
fn exp10_handles_negative_exponents() {
    assert_eq!(exp10(3), 1000.0);
    assert_eq!(exp10(0), 1.0);
    assert_eq!(exp10(-2), 0.01);
}
