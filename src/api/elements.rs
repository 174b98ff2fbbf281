//! Element data as seen by the axis reset: extents and bar samples.

use serde::{Deserialize, Serialize};

use crate::core::DataRange;

/// Names of the x and y axes an element is mapped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisPair {
    pub x: String,
    pub y: String,
}

impl AxisPair {
    #[must_use]
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl Default for AxisPair {
    fn default() -> Self {
        Self::new("x", "y")
    }
}

/// Per-axis context needed to compute extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtentQuery {
    pub x_log: bool,
    pub y_log: bool,
    pub bar_baseline: f64,
}

/// Extents an element contributes to its two axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataExtents {
    pub x: DataRange,
    pub y: DataRange,
}

impl Default for DataExtents {
    fn default() -> Self {
        Self {
            x: DataRange::EMPTY,
            y: DataRange::EMPTY,
        }
    }
}

/// Collaborator contract for anything plotted against a pair of axes.
pub trait PlotElement {
    fn axes(&self) -> &AxisPair;

    fn is_hidden(&self) -> bool {
        false
    }

    fn extents(&self, query: &ExtentQuery) -> DataExtents;

    /// `(x, y)` samples of a bar element, folded into stacked sums when the
    /// graph stacks bars. Other elements return `None`.
    fn bar_samples(&self) -> Option<(&[f64], &[f64])> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ElementKind {
    #[default]
    Line,
    /// Bars centered on x, `bar_width` wide in x-axis units.
    Bar { bar_width: f64 },
}

/// Plain element with owned sample vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
    pub axes: AxisPair,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default)]
    pub hidden: bool,
}

impl Element {
    #[must_use]
    pub fn line(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind: ElementKind::Line,
            axes: AxisPair::default(),
            x,
            y,
            hidden: false,
        }
    }

    #[must_use]
    pub fn bar(name: impl Into<String>, bar_width: f64, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            kind: ElementKind::Bar { bar_width },
            ..Self::line(name, x, y)
        }
    }

    #[must_use]
    pub fn with_axes(mut self, axes: AxisPair) -> Self {
        self.axes = axes;
        self
    }

    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

impl PlotElement for Element {
    fn axes(&self) -> &AxisPair {
        &self.axes
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn extents(&self, query: &ExtentQuery) -> DataExtents {
        let mut extents = DataExtents::default();
        let half_width = match self.kind {
            ElementKind::Line => 0.0,
            ElementKind::Bar { bar_width } => bar_width * 0.5,
        };
        for (&x, &y) in self.x.iter().zip(&self.y) {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let (low, high) = (x - half_width, x + half_width);
            if !query.x_log || low > 0.0 {
                extents.x.fold(low, high);
            } else if x > 0.0 {
                extents.x.fold(x, x);
            }
            if !(query.y_log && y <= 0.0) {
                extents.y.fold(y, y);
            }
        }
        if matches!(self.kind, ElementKind::Bar { .. })
            && !extents.y.is_empty()
            && !(query.y_log && query.bar_baseline <= 0.0)
        {
            extents.y.fold(query.bar_baseline, query.bar_baseline);
        }
        extents
    }

    fn bar_samples(&self) -> Option<(&[f64], &[f64])> {
        match self.kind {
            ElementKind::Bar { .. } => Some((&self.x, &self.y)),
            ElementKind::Line => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Element, ExtentQuery, PlotElement};

    const LINEAR: ExtentQuery = ExtentQuery {
        x_log: false,
        y_log: false,
        bar_baseline: 0.0,
    };

    #[test]
    fn bars_widen_x_and_reach_the_baseline() {
        let bars = Element::bar("b", 1.0, vec![1.0, 2.0], vec![5.0, 7.0]);
        let extents = bars.extents(&LINEAR);
        assert_eq!((extents.x.min, extents.x.max), (0.5, 2.5));
        assert_eq!((extents.y.min, extents.y.max), (0.0, 7.0));
    }

    #[test]
    fn log_axes_skip_non_positive_samples() {
        let line = Element::line("l", vec![1.0, 2.0, 3.0], vec![-1.0, 0.0, 10.0]);
        let query = ExtentQuery {
            y_log: true,
            ..LINEAR
        };
        let extents = line.extents(&query);
        assert_eq!((extents.y.min, extents.y.max), (10.0, 10.0));
    }
}
