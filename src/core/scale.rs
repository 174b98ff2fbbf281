use serde::{Deserialize, Serialize};

use crate::core::nice::{exp10, nice_number};
use crate::core::ticks::{
    LOG_DECADE_MINOR_COUNT, MAX_TICKS, TickSweep, ceil_to_multiple, floor_to_multiple,
};
use crate::error::{GraphError, GraphResult};

/// Whether a displayed bound may extend past the data to the next major tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoundPolicy {
    /// The bound hugs the data extent.
    #[default]
    Tight,
    /// The bound extends to the outer tick unless a limit was requested.
    Loose,
    /// The bound always extends to the outer tick.
    AlwaysLoose,
}

impl BoundPolicy {
    fn uses_data_bound(self, requested: bool) -> bool {
        match self {
            Self::Tight => true,
            Self::Loose => requested,
            Self::AlwaysLoose => false,
        }
    }
}

/// Normalized extent `(min, max, range, scale)` of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub scale: f64,
}

impl AxisRange {
    /// Builds a range, widening spans thinner than `f64::EPSILON` to one unit
    /// so `min < max` always holds.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let mut max = max;
        let mut range = max - min;
        if range.is_nan() || range.abs() < f64::EPSILON {
            range = 1.0;
            max = min + range;
        }
        Self {
            min,
            max,
            range,
            scale: 1.0 / range,
        }
    }

    /// Tests whether `value` lies inside the range, allowing for rounding.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if self.range < f64::EPSILON {
            return (self.max - value).abs() >= f64::EPSILON;
        }
        let norm = (value - self.min) * self.scale;
        norm >= -f64::EPSILON && (norm - 1.0) < f64::EPSILON
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Running min/max accumulator for data folded into an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub min: f64,
    pub max: f64,
}

impl DataRange {
    /// Seed value: any folded sample replaces both bounds.
    pub const EMPTY: Self = Self {
        min: f64::MAX,
        max: -f64::MAX,
    };

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min == f64::MAX && self.max == -f64::MAX
    }

    pub fn fold(&mut self, min: f64, max: f64) {
        if min.is_finite() && min < self.min {
            self.min = min;
        }
        if max.is_finite() && max > self.max {
            self.max = max;
        }
    }
}

impl Default for DataRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Inputs to the linear and logarithmic scale algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRequest {
    /// Lower bound to cover, in data units.
    pub min: f64,
    /// Upper bound to cover, in data units.
    pub max: f64,
    pub min_requested: bool,
    pub max_requested: bool,
    /// Explicit major step; `None` derives one from `major_tick_count`.
    pub step: Option<f64>,
    pub major_tick_count: usize,
    /// Minor subdivisions per major interval; zero disables minor ticks.
    pub minor_subdivisions: usize,
    /// Minor subdivisions only apply to automatically generated majors.
    pub auto_major: bool,
    pub loose_min: BoundPolicy,
    pub loose_max: BoundPolicy,
}

impl ScaleRequest {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_requested: false,
            max_requested: false,
            step: None,
            major_tick_count: 4,
            minor_subdivisions: 2,
            auto_major: true,
            loose_min: BoundPolicy::Tight,
            loose_max: BoundPolicy::Tight,
        }
    }

    #[must_use]
    pub fn with_loose(mut self, policy: BoundPolicy) -> Self {
        self.loose_min = policy;
        self.loose_max = policy;
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    #[must_use]
    pub fn with_major_tick_count(mut self, count: usize) -> Self {
        self.major_tick_count = count;
        self
    }

    #[must_use]
    pub fn with_minor_subdivisions(mut self, count: usize) -> Self {
        self.minor_subdivisions = count;
        self
    }

    #[must_use]
    pub fn with_requested(mut self, min_requested: bool, max_requested: bool) -> Self {
        self.min_requested = min_requested;
        self.max_requested = max_requested;
        self
    }
}

/// Output of a scale algorithm: the display range plus major/minor sweeps.
///
/// Minor sweep values are fractions of the major step (log-decade sweeps
/// are decade offsets), to be added to every major tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub range: AxisRange,
    pub major: TickSweep,
    pub minor: TickSweep,
}

impl Default for AxisScale {
    fn default() -> Self {
        Self {
            range: AxisRange::default(),
            major: TickSweep::empty(),
            minor: TickSweep::empty(),
        }
    }
}

/// Computes a linear display range and tick sweeps for `request`.
pub fn scale_linear(request: &ScaleRequest) -> GraphResult<AxisScale> {
    let (mut min, mut max) = (request.min, request.max);
    ensure_finite(min, max)?;
    if min >= max {
        min -= 0.5;
        max = min + 1.0;
    }

    let range = max - min;
    let step = match request.step {
        Some(requested) => {
            if !requested.is_finite() || requested <= 0.0 {
                return Err(GraphError::InvalidRange(format!(
                    "major step must be finite and > 0, got {requested}"
                )));
            }
            // Keep at least two major ticks visible.
            let mut step = requested;
            while 2.0 * step >= range {
                step *= 0.5;
            }
            step
        }
        None => {
            let count = request.major_tick_count.max(1) as f64;
            nice_number(nice_number(range, false)? / count, true)?
        }
    };

    let tick_min = floor_to_multiple(min, step) + 0.0;
    let tick_max = ceil_to_multiple(max, step) + 0.0;
    let count = tick_count(tick_min, tick_max, step)?;
    let major = TickSweep::linear(tick_min, step, count)?;

    let axis_min = if request.loose_min.uses_data_bound(request.min_requested) {
        min
    } else {
        tick_min
    };
    let axis_max = if request.loose_max.uses_data_bound(request.max_requested) {
        max
    } else {
        tick_max
    };

    let minor = if request.minor_subdivisions > 0 && request.auto_major {
        let subdivisions = request.minor_subdivisions;
        let fraction = 1.0 / subdivisions as f64;
        TickSweep::linear(fraction, fraction, subdivisions - 1)?
    } else {
        TickSweep::empty()
    };

    Ok(AxisScale {
        range: AxisRange::new(axis_min, axis_max),
        major,
        minor,
    })
}

/// Computes a logarithmic display range and tick sweeps for `request`.
///
/// The resulting range is expressed in `log10` units. Spans of up to ten
/// decades get one major tick per decade with log-decade minor ticks; wider
/// spans step through the decades with a nice linear step instead.
pub fn scale_log(request: &ScaleRequest) -> GraphResult<AxisScale> {
    ensure_finite(request.min, request.max)?;
    let log_min = if request.min != 0.0 {
        request.min.abs().log10()
    } else {
        0.0
    };
    let log_max = if request.max != 0.0 {
        request.max.abs().log10()
    } else {
        1.0
    };
    let (log_min, log_max) = if log_min < log_max {
        (log_min, log_max)
    } else {
        (log_min, log_min + 1.0)
    };

    let mut tick_min = log_min.floor();
    let mut tick_max = log_max.ceil();
    let decades = tick_max - tick_min;

    let (major, minor) = if decades > 10.0 {
        let range = nice_number(decades, false)?;
        let count = request.major_tick_count.max(1) as f64;
        let major_step = nice_number(range / count, true)?;
        tick_min = floor_to_multiple(tick_min, major_step);
        tick_max = ceil_to_multiple(tick_max, major_step);
        let major = TickSweep::linear(
            tick_min,
            major_step,
            tick_count(tick_min, tick_max, major_step)?,
        )?;

        let minor_step = exp10(major_step.log10().floor() as i32);
        let minor = if minor_step == major_step {
            TickSweep::linear(0.2, 0.2, 4)?
        } else {
            let count = (major_step / minor_step).round() as usize - 1;
            let fraction = minor_step / major_step;
            TickSweep::linear(fraction, fraction, count)?
        };
        (major, minor)
    } else {
        if tick_min == tick_max {
            tick_max += 1.0;
        }
        let count = tick_count(tick_min, tick_max, 1.0)?;
        (
            TickSweep::linear(tick_min, 1.0, count)?,
            TickSweep::log_decade(LOG_DECADE_MINOR_COUNT),
        )
    };

    let axis_min = if request.loose_min.uses_data_bound(request.min_requested) {
        log_min
    } else {
        tick_min
    };
    let axis_max = if request.loose_max.uses_data_bound(request.max_requested) {
        log_max
    } else {
        tick_max
    };

    Ok(AxisScale {
        range: AxisRange::new(axis_min, axis_max),
        major,
        minor,
    })
}

fn tick_count(tick_min: f64, tick_max: f64, step: f64) -> GraphResult<usize> {
    let steps = ((tick_max - tick_min) / step).round();
    if !steps.is_finite() || steps + 1.0 > MAX_TICKS as f64 {
        return Err(GraphError::TooManyTicks {
            count: if steps.is_finite() {
                steps as usize + 1
            } else {
                usize::MAX
            },
            limit: MAX_TICKS,
        });
    }
    Ok(steps as usize + 1)
}

fn ensure_finite(min: f64, max: f64) -> GraphResult<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(GraphError::InvalidRange(format!(
            "axis bounds must be finite, got min={min} max={max}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{AxisRange, DataRange};

    #[test]
    fn degenerate_range_is_widened() {
        let range = AxisRange::new(5.0, 5.0);
        assert!(range.min < range.max);
        assert_eq!(range.scale, 1.0);
    }

    #[test]
    fn contains_includes_both_edges() {
        let range = AxisRange::new(0.0, 10.0);
        assert!(range.contains(0.0));
        assert!(range.contains(10.0));
        assert!(!range.contains(10.5));
        assert!(!range.contains(-0.01));
    }

    #[test]
    fn data_range_ignores_non_finite_samples() {
        let mut range = DataRange::EMPTY;
        range.fold(f64::NAN, f64::INFINITY);
        assert!(range.is_empty());
        range.fold(-2.0, 3.0);
        assert_eq!((range.min, range.max), (-2.0, 3.0));
    }
}
