use serde::{Deserialize, Serialize};

/// Where the legend is drawn. Only margin sites consume layout space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LegendSite {
    #[default]
    Right,
    Left,
    Top,
    Bottom,
    /// Inside the plot area.
    Plot,
    /// At explicit screen coordinates.
    Xy,
    /// In a separate toplevel window.
    Window,
}

/// Size and site reported by the legend collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LegendGeometry {
    pub width: f64,
    pub height: f64,
    pub site: LegendSite,
    pub hidden: bool,
}

impl LegendGeometry {
    #[must_use]
    pub fn new(width: f64, height: f64, site: LegendSite) -> Self {
        Self {
            width,
            height,
            site,
            hidden: false,
        }
    }

    #[must_use]
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::default()
        }
    }
}

/// Sizes the legend for a candidate plot area.
pub trait LegendSizer {
    fn size_legend(&self, plot_width: f64, plot_height: f64) -> LegendGeometry;
}

impl<F> LegendSizer for F
where
    F: Fn(f64, f64) -> LegendGeometry,
{
    fn size_legend(&self, plot_width: f64, plot_height: f64) -> LegendGeometry {
        self(plot_width, plot_height)
    }
}

/// Legend that never takes space.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenLegend;

impl LegendSizer for HiddenLegend {
    fn size_legend(&self, _plot_width: f64, _plot_height: f64) -> LegendGeometry {
        LegendGeometry::hidden()
    }
}

/// Legend with a size independent of the plot area.
#[derive(Debug, Clone, Copy)]
pub struct FixedLegend(pub LegendGeometry);

impl LegendSizer for FixedLegend {
    fn size_legend(&self, _plot_width: f64, _plot_height: f64) -> LegendGeometry {
        self.0
    }
}
