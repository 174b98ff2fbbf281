use serde::{Deserialize, Serialize};

use crate::core::{
    AxisClass, AxisRange, AxisScale, AxisTransform, DataRange, MarginSide, Orientation, Point,
    ScreenWindow, TickStep,
};

use super::AxisOptions;

/// One generated tick label, regenerated on every geometry pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabel {
    /// Tick value in mapping units (`log10` on log axes).
    pub value: f64,
    /// Where the label sits along the axis, in mapping units. Differs from
    /// `value` when labels are offset between ticks.
    pub position: f64,
    pub text: String,
    /// Rotated bounding box, rounded to whole pixels.
    pub width: f64,
    pub height: f64,
    /// Screen anchor, set once the axis has been placed.
    pub anchor: Point,
}

/// Space an axis needs perpendicular to its own direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisGeometry {
    /// Height of a horizontal axis, width of a vertical one.
    pub thickness: f64,
    pub max_tick_width: f64,
    pub max_tick_height: f64,
    pub title_width: f64,
    pub title_height: f64,
}

/// Screen placement written back by the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisPlacement {
    /// Coordinate of the axis line perpendicular to the axis direction.
    pub line_position: f64,
    /// Distance from the line to the tick label anchors.
    pub label_distance: f64,
}

/// A logical coordinate axis and everything computed for it.
///
/// Tick arrays and labels are rebuilt wholesale on every reset and layout
/// pass; nothing here is patched incrementally.
#[derive(Debug, Clone)]
pub struct Axis {
    pub(super) name: String,
    pub(super) class: AxisClass,
    pub(super) options: AxisOptions,
    pub(super) margin: Option<MarginSide>,
    pub(super) orientation: Orientation,
    pub(super) data_range: DataRange,
    pub(super) value_range: AxisRange,
    pub(super) scale: AxisScale,
    pub(super) major_ticks: Vec<f64>,
    pub(super) minor_fractions: Vec<f64>,
    pub(super) minor_ticks: Vec<f64>,
    pub(super) labels: Vec<TickLabel>,
    pub(super) geometry: AxisGeometry,
    pub(super) window: ScreenWindow,
    pub(super) placement: AxisPlacement,
    pub(super) prev_limits: Option<(f64, f64)>,
    pub(super) dirty: bool,
    pub(super) ref_count: usize,
    pub(super) delete_pending: bool,
}

impl Axis {
    pub(super) fn new(name: impl Into<String>, class: AxisClass, options: AxisOptions) -> Self {
        Self {
            name: name.into(),
            class,
            options,
            margin: None,
            orientation: Orientation::default(),
            data_range: DataRange::EMPTY,
            value_range: AxisRange::default(),
            scale: AxisScale::default(),
            major_ticks: Vec::new(),
            minor_fractions: Vec::new(),
            minor_ticks: Vec::new(),
            labels: Vec::new(),
            geometry: AxisGeometry::default(),
            window: ScreenWindow::default(),
            placement: AxisPlacement::default(),
            prev_limits: None,
            dirty: true,
            ref_count: 0,
            delete_pending: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn class(&self) -> AxisClass {
        self.class
    }

    #[must_use]
    pub fn options(&self) -> &AxisOptions {
        &self.options
    }

    /// Margin the axis is displayed in, `None` when unused.
    #[must_use]
    pub fn margin(&self) -> Option<MarginSide> {
        self.margin
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Raw extent folded from element data during the last reset.
    #[must_use]
    pub fn data_range(&self) -> DataRange {
        self.data_range
    }

    /// Data extent after empty and degenerate corrections, in data units.
    #[must_use]
    pub fn value_range(&self) -> AxisRange {
        self.value_range
    }

    /// Display range in mapping units.
    #[must_use]
    pub fn range(&self) -> AxisRange {
        self.scale.range
    }

    #[must_use]
    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    /// Major tick values in mapping units.
    #[must_use]
    pub fn major_ticks(&self) -> &[f64] {
        &self.major_ticks
    }

    /// Absolute minor tick values inside the axis range, in mapping units.
    #[must_use]
    pub fn minor_ticks(&self) -> &[f64] {
        &self.minor_ticks
    }

    #[must_use]
    pub fn labels(&self) -> &[TickLabel] {
        &self.labels
    }

    #[must_use]
    pub fn geometry(&self) -> AxisGeometry {
        self.geometry
    }

    #[must_use]
    pub fn window(&self) -> ScreenWindow {
        self.window
    }

    #[must_use]
    pub fn placement(&self) -> AxisPlacement {
        self.placement
    }

    /// Display limits in data units.
    #[must_use]
    pub fn limits(&self) -> (f64, f64) {
        let range = self.scale.range;
        if self.options.log_scale {
            (10_f64.powf(range.min), 10_f64.powf(range.max))
        } else {
            (range.min, range.max)
        }
    }

    /// Whether the limits changed during the last reset.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn ref_count(&self) -> usize {
        self.ref_count
    }

    #[must_use]
    pub fn is_delete_pending(&self) -> bool {
        self.delete_pending
    }

    /// Displayed axes sit in a margin and are not hidden.
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.margin.is_some() && !self.options.hidden
    }

    #[must_use]
    pub fn transform(&self) -> AxisTransform {
        AxisTransform {
            range: self.scale.range,
            log_scale: self.options.log_scale,
            descending: self.options.descending,
            orientation: self.orientation,
            window: self.window,
        }
    }

    pub(super) fn to_axis_units(&self, value: f64) -> f64 {
        if self.options.log_scale && value != 0.0 {
            value.abs().log10()
        } else {
            value
        }
    }

    /// Distance from the major tick at `index` to the next one. Expands
    /// minor fractions and centers offset labels.
    pub(super) fn major_interval(&self, index: usize) -> Option<f64> {
        match self.scale.major.step {
            TickStep::Linear(step) if step > 0.0 && self.options.major_ticks.is_none() => {
                Some(step)
            }
            _ => {
                let next = self.major_ticks.get(index + 1)?;
                let gap = next - self.major_ticks[index];
                (gap > 0.0).then_some(gap)
            }
        }
    }

    /// Expands minor fractions into absolute positions: `major + f * step`
    /// for linear sweeps, `major + f` for log-decade offsets.
    pub(super) fn place_minor_ticks(&mut self) {
        let range = self.scale.range;
        let log_decade = self.options.major_ticks.is_none()
            && self.options.minor_ticks.is_none()
            && matches!(self.scale.minor.step, TickStep::LogDecade);
        let mut placed = Vec::with_capacity(self.major_ticks.len() * self.minor_fractions.len());
        for (index, major) in self.major_ticks.iter().enumerate() {
            let step = if log_decade {
                Some(1.0)
            } else {
                self.major_interval(index)
            };
            let Some(step) = step else {
                continue;
            };
            for fraction in &self.minor_fractions {
                let value = major + fraction * step;
                if range.contains(value) {
                    placed.push(value);
                }
            }
        }
        self.minor_ticks = placed;
    }

    /// Records the new display limits and flags the axis when they moved.
    pub(super) fn track_limits(&mut self) {
        let limits = (self.scale.range.min, self.scale.range.max);
        self.dirty = self.prev_limits != Some(limits);
        self.prev_limits = Some(limits);
    }
}
