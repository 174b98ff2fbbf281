use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{BoundPolicy, MAX_TICKS};
use crate::error::{GraphError, GraphResult};
use crate::text::FontSpec;

/// User-facing options of one axis.
///
/// `None` limits mean "derive from data". Requested limits that conflict
/// (`min >= max`) are both discarded when the options are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Bounds of the scrollable world; default to the data extent.
    #[serde(default)]
    pub scroll_min: Option<f64>,
    #[serde(default)]
    pub scroll_max: Option<f64>,
    #[serde(default)]
    pub loose_min: BoundPolicy,
    #[serde(default)]
    pub loose_max: BoundPolicy,
    #[serde(default)]
    pub log_scale: bool,
    #[serde(default)]
    pub descending: bool,
    /// Explicit major step in axis units.
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default = "default_major_tick_count")]
    pub major_tick_count: usize,
    #[serde(default = "default_minor_subdivisions")]
    pub minor_subdivisions: usize,
    /// Explicit major tick values, in data units.
    #[serde(default)]
    pub major_ticks: Option<Vec<f64>>,
    /// Explicit minor ticks as fractions of the major interval.
    #[serde(default)]
    pub minor_ticks: Option<Vec<f64>>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_true")]
    pub show_ticks: bool,
    /// Ticks point away from the plot area.
    #[serde(default = "default_true")]
    pub exterior_ticks: bool,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// Major tick length in pixels; negative values point inward.
    #[serde(default = "default_tick_length")]
    pub tick_length: f64,
    #[serde(default)]
    pub tick_font: FontSpec,
    /// Tick label rotation in degrees.
    #[serde(default)]
    pub tick_angle: f64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_font: FontSpec,
    /// Draw the title in the adjoining margin instead of below the labels.
    #[serde(default)]
    pub title_alternate: bool,
    /// Center labels between major ticks.
    #[serde(default)]
    pub label_offset: bool,
    /// Auto-scroll window width in axis units.
    #[serde(default)]
    pub window_size: Option<f64>,
    #[serde(default)]
    pub shift_by: f64,
    /// Pixels moved by one scroll unit.
    #[serde(default = "default_scroll_units")]
    pub scroll_units: f64,
    /// Reject non-positive limits on log axes instead of ignoring them.
    #[serde(default)]
    pub check_limits: bool,
}

impl AxisOptions {
    #[must_use]
    pub fn with_limits(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn with_scroll_limits(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.scroll_min = min;
        self.scroll_max = max;
        self
    }

    #[must_use]
    pub fn with_loose(mut self, policy: BoundPolicy) -> Self {
        self.loose_min = policy;
        self.loose_max = policy;
        self
    }

    #[must_use]
    pub fn with_log_scale(mut self, log_scale: bool) -> Self {
        self.log_scale = log_scale;
        self
    }

    #[must_use]
    pub fn with_descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    #[must_use]
    pub fn with_major_ticks(mut self, ticks: Vec<f64>) -> Self {
        self.major_ticks = Some(ticks);
        self
    }

    #[must_use]
    pub fn with_minor_ticks(mut self, fractions: Vec<f64>) -> Self {
        self.minor_ticks = Some(fractions);
        self
    }

    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_window(mut self, window_size: f64, shift_by: f64) -> Self {
        self.window_size = Some(window_size);
        self.shift_by = shift_by;
        self
    }

    /// Serializes options to pretty JSON.
    pub fn to_json_pretty(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GraphError::InvalidConfig(format!("failed to serialize axis options: {e}"))
        })
    }

    /// Deserializes options from JSON.
    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GraphError::InvalidConfig(format!("failed to parse axis options: {e}")))
    }
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            scroll_min: None,
            scroll_max: None,
            loose_min: BoundPolicy::Tight,
            loose_max: BoundPolicy::Tight,
            log_scale: false,
            descending: false,
            step: None,
            major_tick_count: default_major_tick_count(),
            minor_subdivisions: default_minor_subdivisions(),
            major_ticks: None,
            minor_ticks: None,
            hidden: false,
            show_ticks: true,
            exterior_ticks: true,
            line_width: default_line_width(),
            tick_length: default_tick_length(),
            tick_font: FontSpec::default(),
            tick_angle: 0.0,
            title: None,
            title_font: FontSpec::default(),
            title_alternate: false,
            label_offset: false,
            window_size: None,
            shift_by: 0.0,
            scroll_units: default_scroll_units(),
            check_limits: false,
        }
    }
}

/// Validates `options` for the axis `name` and returns the normalized form
/// that is stored on the axis.
pub(super) fn normalize_axis_options(name: &str, options: AxisOptions) -> GraphResult<AxisOptions> {
    let mut options = options;

    for (label, value) in [
        ("min", options.min),
        ("max", options.max),
        ("scroll min", options.scroll_min),
        ("scroll max", options.scroll_max),
    ] {
        if let Some(value) = value {
            if !value.is_finite() {
                return Err(GraphError::InvalidRange(format!(
                    "axis \"{name}\" {label} must be finite, got {value}"
                )));
            }
        }
    }

    if options.log_scale {
        drop_non_positive_limit(name, "min", &mut options.min, options.check_limits)?;
        drop_non_positive_limit(name, "max", &mut options.max, options.check_limits)?;
        drop_non_positive_limit(
            name,
            "scroll min",
            &mut options.scroll_min,
            options.check_limits,
        )?;
        drop_non_positive_limit(
            name,
            "scroll max",
            &mut options.scroll_max,
            options.check_limits,
        )?;
    }

    if let (Some(min), Some(max)) = (options.min, options.max) {
        if min >= max {
            warn!(axis = name, min, max, "discarding conflicting requested limits");
            options.min = None;
            options.max = None;
        }
    }
    if let (Some(min), Some(max)) = (options.scroll_min, options.scroll_max) {
        if min >= max {
            warn!(axis = name, min, max, "discarding conflicting scroll limits");
            options.scroll_min = None;
            options.scroll_max = None;
        }
    }

    if let Some(step) = options.step {
        if !step.is_finite() || step <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "axis \"{name}\" step must be finite and > 0, got {step}"
            )));
        }
    }
    if options.major_tick_count == 0 {
        return Err(GraphError::InvalidConfig(format!(
            "axis \"{name}\" needs at least one major tick"
        )));
    }
    if options.minor_subdivisions > MAX_TICKS {
        return Err(GraphError::TooManyTicks {
            count: options.minor_subdivisions,
            limit: MAX_TICKS,
        });
    }
    validate_tick_list(name, "major", options.major_ticks.as_deref())?;
    validate_tick_list(name, "minor", options.minor_ticks.as_deref())?;
    if options.log_scale {
        if let Some(ticks) = options.major_ticks.as_mut() {
            let before = ticks.len();
            ticks.retain(|value| *value > 0.0);
            if ticks.len() != before {
                warn!(
                    axis = name,
                    dropped = before - ticks.len(),
                    "ignoring non-positive major ticks on log axis"
                );
            }
        }
    }

    for (label, value) in [
        ("line width", options.line_width),
        ("shift by", options.shift_by),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "axis \"{name}\" {label} must be finite and >= 0, got {value}"
            )));
        }
    }
    if !options.tick_length.is_finite() || !options.tick_angle.is_finite() {
        return Err(GraphError::InvalidConfig(format!(
            "axis \"{name}\" tick length and angle must be finite"
        )));
    }
    if let Some(window_size) = options.window_size {
        if !window_size.is_finite() || window_size <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "axis \"{name}\" window size must be finite and > 0, got {window_size}"
            )));
        }
    }
    if !options.scroll_units.is_finite() || options.scroll_units <= 0.0 {
        return Err(GraphError::InvalidConfig(format!(
            "axis \"{name}\" scroll units must be finite and > 0, got {}",
            options.scroll_units
        )));
    }
    for font in [&options.tick_font, &options.title_font] {
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "axis \"{name}\" font size must be finite and > 0"
            )));
        }
    }

    Ok(options)
}

fn drop_non_positive_limit(
    name: &str,
    label: &str,
    limit: &mut Option<f64>,
    check_limits: bool,
) -> GraphResult<()> {
    let Some(value) = *limit else {
        return Ok(());
    };
    if value > 0.0 {
        return Ok(());
    }
    if check_limits {
        return Err(GraphError::InvalidRange(format!(
            "bad logscale {label} limit \"{value}\" for axis \"{name}\": must be > 0"
        )));
    }
    warn!(
        axis = name,
        limit = label,
        value,
        "ignoring non-positive limit on log axis"
    );
    *limit = None;
    Ok(())
}

fn validate_tick_list(name: &str, kind: &str, ticks: Option<&[f64]>) -> GraphResult<()> {
    let Some(ticks) = ticks else {
        return Ok(());
    };
    if ticks.len() > MAX_TICKS {
        return Err(GraphError::TooManyTicks {
            count: ticks.len(),
            limit: MAX_TICKS,
        });
    }
    if ticks.iter().any(|value| !value.is_finite()) {
        return Err(GraphError::InvalidConfig(format!(
            "axis \"{name}\" {kind} ticks must be finite"
        )));
    }
    Ok(())
}

fn default_major_tick_count() -> usize {
    4
}

fn default_minor_subdivisions() -> usize {
    2
}

fn default_true() -> bool {
    true
}

fn default_line_width() -> f64 {
    1.0
}

fn default_tick_length() -> f64 {
    4.0
}

fn default_scroll_units() -> f64 {
    10.0
}
