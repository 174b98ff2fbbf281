use crate::core::{ScrollCommand, ScrollRegion, ViewFractions};
use crate::error::GraphResult;
use crate::text::TextMetrics;

use super::{Axis, Graph};

impl<M: TextMetrics> Graph<M> {
    /// Visible part of the scrollable world of `axis`, as scrollbar
    /// fractions.
    pub fn axis_view(&self, axis: &str) -> GraphResult<ViewFractions> {
        Ok(scroll_region(self.axis(axis)?)?.fractions())
    }

    /// Scrolls `axis` and returns the new view fractions.
    ///
    /// The new view is stored as requested limits; mapping picks it up on
    /// the next reset.
    pub fn scroll_axis(&mut self, name: &str, command: ScrollCommand) -> GraphResult<ViewFractions> {
        let axis = self.axis(name)?;
        let region = scroll_region(axis)?;
        let (view_min, view_max) =
            region.scroll(command, axis.window.extent, axis.options.scroll_units);

        let mut options = axis.options.clone();
        if options.log_scale {
            options.min = Some(10_f64.powf(view_min));
            options.max = Some(10_f64.powf(view_max));
        } else {
            options.min = Some(view_min);
            options.max = Some(view_max);
        }
        self.configure_axis(name, options)?;

        Ok(ScrollRegion {
            view_min,
            view_max,
            ..region
        }
        .fractions())
    }
}

/// World is the data extent (or the scroll limits), view the current
/// display limits.
fn scroll_region(axis: &Axis) -> GraphResult<ScrollRegion> {
    let options = axis.options();
    let value_range = axis.value_range();
    let world = (
        options.scroll_min.unwrap_or(value_range.min),
        options.scroll_max.unwrap_or(value_range.max),
    );
    // Ascending vertical axes run against the scrollbar direction.
    let from_max = axis.orientation().is_horizontal() == options.descending;
    ScrollRegion::new(world, axis.limits(), options.log_scale, from_max)
}
