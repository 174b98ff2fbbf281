use serde::{Deserialize, Serialize};

use crate::core::scale::AxisRange;
use crate::core::types::{Orientation, Point};

/// Pixel span an axis is mapped onto: start offset and extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenWindow {
    pub offset: f64,
    pub extent: f64,
}

impl ScreenWindow {
    /// Builds a window; extents below one pixel are raised to one.
    #[must_use]
    pub fn new(offset: f64, extent: f64) -> Self {
        Self {
            offset,
            extent: extent.max(1.0),
        }
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        1.0 / self.extent
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.offset + self.extent
    }
}

impl Default for ScreenWindow {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Everything needed to map values of one axis to screen coordinates.
///
/// `range` is in mapping units: `log10` of data values for log axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTransform {
    pub range: AxisRange,
    pub log_scale: bool,
    pub descending: bool,
    pub orientation: Orientation,
    pub window: ScreenWindow,
}

impl AxisTransform {
    /// Converts a data value into the axis mapping domain.
    #[must_use]
    pub fn to_axis_units(&self, value: f64) -> f64 {
        if self.log_scale && value != 0.0 {
            value.abs().log10()
        } else {
            value
        }
    }

    /// Position of `value` along the axis in `[0, 1]` for values in range,
    /// with `descending` already applied.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        self.normalize_units(self.to_axis_units(value))
    }

    fn normalize_units(&self, units: f64) -> f64 {
        let t = (units - self.range.min) * self.range.scale;
        if self.descending { 1.0 - t } else { t }
    }

    /// Maps a data value to a screen coordinate. Values outside the range
    /// extrapolate linearly.
    #[must_use]
    pub fn to_screen(&self, value: f64) -> f64 {
        self.units_to_screen(self.to_axis_units(value))
    }

    /// Maps a value already in mapping units (e.g. a log-axis tick) to a
    /// screen coordinate.
    #[must_use]
    pub fn units_to_screen(&self, units: f64) -> f64 {
        let t = self.normalize_units(units);
        match self.orientation {
            Orientation::Horizontal => self.window.offset + t * self.window.extent,
            // Screen y grows downward.
            Orientation::Vertical => self.window.offset + (1.0 - t) * self.window.extent,
        }
    }

    /// Maps a screen coordinate back to a data value.
    #[must_use]
    pub fn from_screen(&self, coordinate: f64) -> f64 {
        let mut t = (coordinate - self.window.offset) * self.window.scale();
        if self.orientation == Orientation::Vertical {
            t = 1.0 - t;
        }
        if self.descending {
            t = 1.0 - t;
        }
        let value = t * self.range.range + self.range.min;
        if self.log_scale {
            10_f64.powf(value)
        } else {
            value
        }
    }
}

/// Maps a data point through an x/y axis pair. On an inverted graph the x
/// axis runs vertically, so the components are swapped on screen.
#[must_use]
pub fn map_2d(
    x: f64,
    y: f64,
    x_axis: &AxisTransform,
    y_axis: &AxisTransform,
    inverted: bool,
) -> Point {
    if inverted {
        Point::new(y_axis.to_screen(y), x_axis.to_screen(x))
    } else {
        Point::new(x_axis.to_screen(x), y_axis.to_screen(y))
    }
}

/// Inverse of [`map_2d`]: returns `(x, y)` data values for a screen point.
#[must_use]
pub fn inv_map_2d(
    screen_x: f64,
    screen_y: f64,
    x_axis: &AxisTransform,
    y_axis: &AxisTransform,
    inverted: bool,
) -> Point {
    if inverted {
        Point::new(x_axis.from_screen(screen_y), y_axis.from_screen(screen_x))
    } else {
        Point::new(x_axis.from_screen(screen_x), y_axis.from_screen(screen_y))
    }
}
