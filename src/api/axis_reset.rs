use tracing::{debug, trace, warn};

use crate::core::{
    AxisRange, DataRange, Orientation, ScaleRequest, ceil_to_multiple, generate_ticks,
    scale_linear, scale_log,
};
use crate::error::{GraphError, GraphResult};
use crate::text::TextMetrics;

use super::graph::AxisResetState;
use super::{Axis, BarMode, BarStacks, ExtentQuery, Graph, PlotElement};

/// Lower bound used for an empty log axis.
const LOG_EMPTY_MIN: f64 = 0.001;

impl<M: TextMetrics> Graph<M> {
    /// Recomputes every axis range from the visible elements.
    ///
    /// All axes are rebuilt on a staged copy; on error the previous ranges
    /// stay in place and the graph remains dirty.
    pub fn reset_axes<E: PlotElement>(&mut self, elements: &[E]) -> GraphResult<()> {
        let stacks = match self.config.bar_mode {
            BarMode::Stacked => BarStacks::from_elements(elements),
            BarMode::Normal => BarStacks::default(),
        };

        let inverted = self.config.inverted;
        let mut staged = self.axes.clone();
        for axis in staged.values_mut() {
            axis.data_range = DataRange::EMPTY;
            axis.orientation = Orientation::resolve(axis.class, inverted);
        }

        let mut folded = 0_usize;
        for element in elements.iter().filter(|element| !element.is_hidden()) {
            let pair = element.axes();
            let (Some(x_axis), Some(y_axis)) = (staged.get(&pair.x), staged.get(&pair.y)) else {
                warn!(
                    x_axis = %pair.x,
                    y_axis = %pair.y,
                    "skipping element mapped to an unknown axis"
                );
                continue;
            };
            let query = ExtentQuery {
                x_log: x_axis.options.log_scale,
                y_log: y_axis.options.log_scale,
                bar_baseline: self.config.bar_baseline,
            };
            let extents = element.extents(&query);
            if let Some(axis) = staged.get_mut(&pair.x) {
                axis.data_range.fold(extents.x.min, extents.x.max);
            }
            if let Some(axis) = staged.get_mut(&pair.y) {
                axis.data_range.fold(extents.y.min, extents.y.max);
            }
            folded += 1;
        }

        for (axes, _x, sum) in stacks.iter() {
            if let Some(axis) = staged.get_mut(&axes.y) {
                if !(axis.options.log_scale && sum <= 0.0) {
                    axis.data_range.fold(sum, sum);
                }
            }
        }

        for axis in staged.values_mut() {
            rescale_for_data(axis)?;
        }

        debug!(
            axes = staged.len(),
            elements = folded,
            stacks = stacks.len(),
            "axes reset"
        );
        self.axes = staged;
        self.stacks = stacks;
        self.reset_state = AxisResetState::Clean;
        self.layout_needed = true;
        self.redraw_needed = true;
        Ok(())
    }
}

/// Resolves the bounds to scale: data extent with empty and degenerate
/// fixes, requested limits, auto-scroll window and scroll limits.
pub(super) fn fix_axis_range(axis: &mut Axis) -> (f64, f64) {
    let options = &axis.options;
    let data = axis.data_range;

    let mut min = if data.min == DataRange::EMPTY.min {
        options
            .min
            .unwrap_or(if options.log_scale { LOG_EMPTY_MIN } else { 0.0 })
    } else {
        data.min
    };
    let mut max = if data.max == DataRange::EMPTY.max {
        options.max.unwrap_or(1.0)
    } else {
        data.max
    };
    if min >= max {
        // Single value: open a 10% range above it.
        if min == 0.0 {
            (min, max) = (0.0, 1.0);
        } else {
            max = min + min.abs() * 0.1;
        }
    }
    axis.value_range = AxisRange::new(min, max);

    if let Some(requested) = options.min {
        min = requested;
    }
    if let Some(requested) = options.max {
        max = requested;
    }
    if max < min {
        // One side was requested and landed beyond the data on the other.
        if options.min.is_none() {
            min = max - max.abs() * 0.1;
        }
        if options.max.is_none() {
            max = min + min.abs() * 0.1;
        }
    }

    if let Some(window_size) = options.window_size {
        if options.min.is_none() && options.max.is_none() {
            let mut window_max = min + window_size;
            if max >= window_max {
                if options.shift_by > 0.0 {
                    window_max = ceil_to_multiple(max, options.shift_by);
                }
                min = window_max - window_size;
            }
            max = window_max;
        }
    }

    if let Some(scroll_min) = options.scroll_min {
        if min < scroll_min {
            min = scroll_min;
        }
    }
    if let Some(scroll_max) = options.scroll_max {
        if max > scroll_max {
            max = scroll_max;
        }
    }
    (min, max)
}

/// Rescales after a data change. An explicit step that the new extent
/// pushes past the tick limit is replaced by the automatic step for this
/// reset only; the stored options keep it.
fn rescale_for_data(axis: &mut Axis) -> GraphResult<()> {
    match rescale_axis(axis) {
        Err(GraphError::TooManyTicks { count, limit }) if axis.options.step.is_some() => {
            warn!(
                axis = %axis.name,
                step = ?axis.options.step,
                count,
                limit,
                "explicit step exceeds the tick limit for this data, using automatic step"
            );
            rescale_axis_with_step(axis, None)
        }
        result => result,
    }
}

/// Runs range resolution and the scale algorithm, then materializes ticks.
pub(super) fn rescale_axis(axis: &mut Axis) -> GraphResult<()> {
    let step = axis.options.step;
    rescale_axis_with_step(axis, step)
}

fn rescale_axis_with_step(axis: &mut Axis, step: Option<f64>) -> GraphResult<()> {
    let (min, max) = fix_axis_range(axis);
    let options = &axis.options;
    let request = ScaleRequest {
        min,
        max,
        min_requested: options.min.is_some(),
        max_requested: options.max.is_some(),
        step,
        major_tick_count: options.major_tick_count,
        minor_subdivisions: options.minor_subdivisions,
        auto_major: options.major_ticks.is_none(),
        loose_min: options.loose_min,
        loose_max: options.loose_max,
    };
    let scale = if options.log_scale {
        scale_log(&request)?
    } else {
        scale_linear(&request)?
    };

    let major_ticks = match &options.major_ticks {
        Some(values) => values.iter().map(|value| axis.to_axis_units(*value)).collect(),
        None => generate_ticks(&scale.major),
    };
    let minor_fractions = match &options.minor_ticks {
        Some(fractions) => fractions.clone(),
        None => generate_ticks(&scale.minor),
    };

    axis.scale = scale;
    axis.major_ticks = major_ticks;
    axis.minor_fractions = minor_fractions;
    axis.place_minor_ticks();
    axis.track_limits();

    trace!(
        axis = %axis.name,
        min = axis.scale.range.min,
        max = axis.scale.range.max,
        major = axis.major_ticks.len(),
        minor = axis.minor_ticks.len(),
        dirty = axis.dirty,
        "axis rescaled"
    );
    Ok(())
}
