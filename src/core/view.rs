//! Scrollbar-style view arithmetic for axes.
//!
//! The scrollable "world" is the data extent of an axis (optionally replaced
//! by scroll limits); the "view" is the part currently mapped on screen.
//! Offsets and window sizes are fractions of the world width.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Fraction of the visible window moved by one page.
pub const PAGE_FRACTION: f64 = 0.9;

/// Scroll request in the classic scrollbar protocol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScrollCommand {
    /// Place the start of the view at this fraction of the world.
    MoveTo(f64),
    /// Scroll by a number of scroll units (pixel multiples).
    Units(i32),
    /// Scroll by a number of pages (90% of the visible window each).
    Pages(i32),
    /// Scroll by a number of pixels.
    Pixels(i32),
}

/// First and last visible fractions of the scrollable world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewFractions {
    pub first: f64,
    pub last: f64,
}

/// World and view extents of one axis, in mapping units (`log10` for log
/// axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    pub world_min: f64,
    pub world_max: f64,
    pub view_min: f64,
    pub view_max: f64,
    /// Vertical ascending axes scroll from the maximum end, since their
    /// values run opposite to the scrollbar.
    pub from_max: bool,
}

impl ScrollRegion {
    /// Builds a region from data-unit extents, bounding the view inside the
    /// world and converting to `log10` when `log_scale` is set.
    pub fn new(
        world: (f64, f64),
        view: (f64, f64),
        log_scale: bool,
        from_max: bool,
    ) -> GraphResult<Self> {
        let (world_min, world_max) = world;
        let view_min = view.0.max(world_min);
        let view_max = view.1.min(world_max);
        let convert = |value: f64| -> GraphResult<f64> {
            if !log_scale {
                return Ok(value);
            }
            if value <= 0.0 {
                return Err(GraphError::InvalidRange(format!(
                    "log axis scroll region needs values > 0, got {value}"
                )));
            }
            Ok(value.log10())
        };
        let region = Self {
            world_min: convert(world_min)?,
            world_max: convert(world_max)?,
            view_min: convert(view_min)?,
            view_max: convert(view_max)?,
            from_max,
        };
        if !(region.world_width() > 0.0) {
            return Err(GraphError::InvalidRange(
                "scroll region has an empty world extent".to_owned(),
            ));
        }
        Ok(region)
    }

    #[must_use]
    pub fn world_width(&self) -> f64 {
        self.world_max - self.world_min
    }

    #[must_use]
    pub fn view_width(&self) -> f64 {
        self.view_max - self.view_min
    }

    /// Visible share of the world; above one when the view is larger.
    #[must_use]
    pub fn window_size(&self) -> f64 {
        self.view_width() / self.world_width()
    }

    fn axis_offset(&self) -> f64 {
        if self.from_max {
            self.world_max - self.view_max
        } else {
            self.view_min - self.world_min
        }
    }

    /// Current view as scrollbar fractions, clamped to `[0, 1]`.
    #[must_use]
    pub fn fractions(&self) -> ViewFractions {
        let offset = self.axis_offset();
        let width = self.world_width();
        ViewFractions {
            first: (offset / width).clamp(0.0, 1.0),
            last: ((offset + self.view_width()) / width).clamp(0.0, 1.0),
        }
    }

    /// Applies `command` and returns the new view bounds `(min, max)` in
    /// mapping units. `screen_extent` is the axis length in pixels and
    /// `units_px` the size of one scroll unit.
    #[must_use]
    pub fn scroll(
        &self,
        command: ScrollCommand,
        screen_extent: f64,
        units_px: f64,
    ) -> (f64, f64) {
        let window = self.window_size();
        let pixel_fraction = window / screen_extent.max(1.0);
        let current = self.axis_offset() / self.world_width();
        let offset = match command {
            ScrollCommand::MoveTo(fraction) => fraction,
            ScrollCommand::Units(count) => {
                current + f64::from(count) * units_px * pixel_fraction
            }
            ScrollCommand::Pages(count) => current + f64::from(count) * window * PAGE_FRACTION,
            ScrollCommand::Pixels(count) => current + f64::from(count) * pixel_fraction,
        };
        let offset = adjust_viewport(offset, window);

        let view_width = self.view_width();
        let world_width = self.world_width();
        if self.from_max {
            let max = self.world_max - offset * world_width;
            (max - view_width, max)
        } else {
            let min = offset * world_width + self.world_min;
            (min, min + view_width)
        }
    }
}

/// Clamps a scroll offset so the view stays inside the world. Views larger
/// than the world may move within it, canvas style.
#[must_use]
pub fn adjust_viewport(offset: f64, window_size: f64) -> f64 {
    let mut offset = offset;
    if window_size > 1.0 {
        if window_size < 1.0 - offset {
            offset = 1.0 - window_size;
        }
        if offset > 0.0 {
            offset = 0.0;
        }
    } else {
        if offset + window_size > 1.0 {
            offset = 1.0 - window_size;
        }
        if offset < 0.0 {
            offset = 0.0;
        }
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::adjust_viewport;

    #[test]
    fn offsets_are_clamped_inside_the_world() {
        assert_eq!(adjust_viewport(-0.3, 0.2), 0.0);
        assert!((adjust_viewport(0.95, 0.2) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn oversized_windows_scroll_canvas_style() {
        assert_eq!(adjust_viewport(0.2, 1.5), 0.0);
        assert!((adjust_viewport(-0.9, 1.5) + 0.5).abs() < 1e-12);
    }
}
