use serde::{Deserialize, Serialize};

use crate::core::types::Point;

/// Bounding box of a rectangle rotated about its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatedBox {
    pub width: f64,
    pub height: f64,
    /// Rotated corners relative to the center, counter-clockwise from the
    /// top-left corner.
    pub corners: [Point; 4],
}

/// Computes the axis-aligned bounding box of a `width` x `height` rectangle
/// rotated by `angle_degrees` (counter-clockwise, screen y down).
#[must_use]
pub fn rotated_bounding_box(width: f64, height: f64, angle_degrees: f64) -> RotatedBox {
    let angle = angle_degrees.rem_euclid(360.0);
    let half_w = width * 0.5;
    let half_h = height * 0.5;

    if angle.rem_euclid(90.0) == 0.0 {
        let quadrant = (angle / 90.0) as u8;
        let (rot_w, rot_h, ul, ur, lr, ll) = match quadrant {
            1 => (
                height,
                width,
                (-half_h, half_w),
                (-half_h, -half_w),
                (half_h, -half_w),
                (half_h, half_w),
            ),
            2 => (
                width,
                height,
                (half_w, half_h),
                (-half_w, half_h),
                (-half_w, -half_h),
                (half_w, -half_h),
            ),
            3 => (
                height,
                width,
                (half_h, -half_w),
                (half_h, half_w),
                (-half_h, half_w),
                (-half_h, -half_w),
            ),
            _ => (
                width,
                height,
                (-half_w, -half_h),
                (half_w, -half_h),
                (half_w, half_h),
                (-half_w, half_h),
            ),
        };
        return RotatedBox {
            width: rot_w,
            height: rot_h,
            corners: [
                Point::new(ul.0, ul.1),
                Point::new(ll.0, ll.1),
                Point::new(lr.0, lr.1),
                Point::new(ur.0, ur.1),
            ],
        };
    }

    let (sin, cos) = (-angle.to_radians()).sin_cos();
    let source = [
        (-half_w, -half_h),
        (-half_w, half_h),
        (half_w, half_h),
        (half_w, -half_h),
    ];
    let mut corners = [Point::default(); 4];
    let (mut max_x, mut max_y) = (0.0_f64, 0.0_f64);
    for (corner, (x, y)) in corners.iter_mut().zip(source) {
        let rx = x * cos - y * sin;
        let ry = x * sin + y * cos;
        max_x = max_x.max(rx.abs());
        max_y = max_y.max(ry.abs());
        *corner = Point::new(rx, ry);
    }

    RotatedBox {
        width: max_x * 2.0,
        height: max_y * 2.0,
        corners,
    }
}

#[cfg(test)]
mod tests {
    use super::rotated_bounding_box;

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let rotated = rotated_bounding_box(40.0, 10.0, 90.0);
        assert_eq!((rotated.width, rotated.height), (10.0, 40.0));
    }

    #[test]
    fn diagonal_rotation_grows_both_sides() {
        let rotated = rotated_bounding_box(40.0, 10.0, 45.0);
        let expected = 50.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert!((rotated.width - expected).abs() < 1e-9);
        assert!((rotated.height - expected).abs() < 1e-9);
    }
}
