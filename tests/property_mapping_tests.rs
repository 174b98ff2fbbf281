use graph_axis::core::{
    AxisRange, AxisTransform, MAX_TICKS, Orientation, ScaleRequest, ScreenWindow,
    generate_ticks, nice_number, scale_linear,
};
use proptest::prelude::*;

fn transform(min: f64, max: f64, log_scale: bool, orientation: Orientation) -> AxisTransform {
    AxisTransform {
        range: AxisRange::new(min, max),
        log_scale,
        descending: false,
        orientation,
        window: ScreenWindow::new(12.0, 480.0),
    }
}

proptest! {
    #[test]
    fn linear_mapping_round_trips(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        t in 0.0f64..1.0,
        vertical in any::<bool>(),
    ) {
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let axis = transform(min, min + span, false, orientation);
        let value = min + t * span;
        let back = axis.from_screen(axis.to_screen(value));
        prop_assert!((back - value).abs() <= 1e-6 * (value.abs() + span));
    }

    #[test]
    fn log_mapping_round_trips(
        low in -5.0f64..5.0,
        decades in 0.1f64..8.0,
        t in 0.0f64..1.0,
    ) {
        let axis = transform(low, low + decades, true, Orientation::Horizontal);
        let value = 10_f64.powf(low + t * decades);
        let back = axis.from_screen(axis.to_screen(value));
        prop_assert!((back - value).abs() <= 1e-6 * value);
    }

    #[test]
    fn mapping_is_monotonic(
        min in -1_000.0f64..1_000.0,
        span in 0.01f64..1_000.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
        descending in any::<bool>(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let horizontal = AxisTransform {
            descending,
            ..transform(min, min + span, false, Orientation::Horizontal)
        };
        let vertical = AxisTransform {
            descending,
            ..transform(min, min + span, false, Orientation::Vertical)
        };
        let (v1, v2) = (min + low * span, min + high * span);

        let dx = horizontal.to_screen(v2) - horizontal.to_screen(v1);
        let dy = vertical.to_screen(v2) - vertical.to_screen(v1);
        if descending {
            prop_assert!(dx <= 1e-9 && dy >= -1e-9);
        } else {
            prop_assert!(dx >= -1e-9 && dy <= 1e-9);
        }
    }

    #[test]
    fn nice_number_is_idempotent(x in 0.000001f64..1_000_000.0) {
        let once = nice_number(x, false).expect("positive input");
        let twice = nice_number(once, false).expect("positive input");
        prop_assert_eq!(once, twice);
        prop_assert!(once >= x * (1.0 - 1e-9));
    }

    #[test]
    fn generated_ticks_stay_within_the_limit(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        count in 1usize..20,
    ) {
        let request = ScaleRequest::new(min, min + span).with_major_tick_count(count);
        let scale = scale_linear(&request).expect("auto step stays small");
        let ticks = generate_ticks(&scale.major);
        prop_assert!(scale.major.count <= MAX_TICKS);
        prop_assert_eq!(ticks.len(), scale.major.count);
        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
