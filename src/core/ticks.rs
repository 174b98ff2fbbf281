use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Hard cap on the number of ticks a single sweep may produce.
pub const MAX_TICKS: usize = 10_001;

/// `log10(1..=10)`, spelled out so every platform yields identical ticks.
pub const LOG_DECADE_TABLE: [f64; 10] = [
    0.0,
    0.301_029_995_663_981,
    0.477_121_254_719_662,
    0.602_059_991_327_962,
    0.698_970_004_336_019,
    0.778_151_250_383_644,
    0.845_098_040_014_257,
    0.903_089_986_991_944,
    0.954_242_509_439_325,
    1.0,
];

/// Number of log-decade offsets used for minor ticks: `log10(1)..=log10(9)`.
pub const LOG_DECADE_MINOR_COUNT: usize = 9;

/// How consecutive ticks of a sweep are spaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickStep {
    /// Evenly spaced values `step` apart.
    Linear(f64),
    /// Offsets taken from [`LOG_DECADE_TABLE`] inside one decade.
    LogDecade,
}

/// Descriptor for a run of tick values: where it starts, how it steps, and
/// how many values it yields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickSweep {
    pub initial: f64,
    pub step: TickStep,
    pub count: usize,
}

impl TickSweep {
    /// Linear sweep. Fails when `count` is over [`MAX_TICKS`].
    pub fn linear(initial: f64, step: f64, count: usize) -> GraphResult<Self> {
        if count > MAX_TICKS {
            return Err(GraphError::TooManyTicks {
                count,
                limit: MAX_TICKS,
            });
        }
        if count > 0 && (!step.is_finite() || step <= 0.0 || !initial.is_finite()) {
            return Err(GraphError::InvalidRange(format!(
                "tick sweep needs a finite start and a step > 0, got start={initial} step={step}"
            )));
        }
        Ok(Self {
            initial,
            step: TickStep::Linear(step),
            count,
        })
    }

    /// Sweep over the fixed per-decade log table, truncated to the table size.
    #[must_use]
    pub fn log_decade(count: usize) -> Self {
        Self {
            initial: 0.0,
            step: TickStep::LogDecade,
            count: count.min(LOG_DECADE_TABLE.len()),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            initial: 0.0,
            step: TickStep::Linear(0.0),
            count: 0,
        }
    }

    /// Step size in axis units; log-decade sweeps report zero.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        match self.step {
            TickStep::Linear(step) => step,
            TickStep::LogDecade => 0.0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for TickSweep {
    fn default() -> Self {
        Self::empty()
    }
}

/// Materializes the values of a sweep. Exactly `sweep.count` values are
/// produced, in ascending order.
#[must_use]
pub fn generate_ticks(sweep: &TickSweep) -> Vec<f64> {
    let mut values = Vec::with_capacity(sweep.count);
    match sweep.step {
        TickStep::LogDecade => {
            values.extend(LOG_DECADE_TABLE.iter().take(sweep.count).copied());
        }
        TickStep::Linear(step) => {
            let mut value = sweep.initial;
            for _ in 0..sweep.count {
                // Snap to the step grid so accumulated drift never shows up.
                value = round_to_multiple(value, step);
                values.push(value);
                value += step;
            }
        }
    }
    values
}

/// Rounds `value` to the nearest multiple of `step`.
#[must_use]
pub fn round_to_multiple(value: f64, step: f64) -> f64 {
    if step == 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Rounds `value` down to a multiple of `step`.
#[must_use]
pub fn floor_to_multiple(value: f64, step: f64) -> f64 {
    (value / step).floor() * step
}

/// Rounds `value` up to a multiple of `step`.
#[must_use]
pub fn ceil_to_multiple(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}
