use serde::{Deserialize, Serialize};

use crate::core::{Padding, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::text::FontSpec;

/// How bar elements sharing an x value combine when folding axis extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BarMode {
    /// Bars are drawn independently.
    #[default]
    Normal,
    /// Bars at the same x are stacked, so their sums bound the y axis.
    Stacked,
}

/// Margin layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutStrategy {
    /// Size the legend once against the plot estimate that ignores it.
    #[default]
    SinglePass,
    /// Re-size the legend against the resulting plot area until the plot
    /// size stops changing.
    Converge { max_iterations: u8 },
}

/// User-fixed margin sizes. `None` lets the layout compute the margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MarginRequest {
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub bottom: Option<f64>,
}

/// Graph-wide options that drive axis layout.
///
/// Serializable so hosts can persist graph setup next to their own widget
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub viewport: Viewport,
    /// Swap the screen directions of X and Y axes.
    #[serde(default)]
    pub inverted: bool,
    /// Overlay all axes of a margin in one band instead of side by side.
    #[serde(default)]
    pub stack_axes: bool,
    /// Requested plot width/height ratio.
    #[serde(default)]
    pub aspect: Option<f64>,
    #[serde(default)]
    pub plot_width: Option<f64>,
    #[serde(default)]
    pub plot_height: Option<f64>,
    #[serde(default)]
    pub margins: MarginRequest,
    #[serde(default)]
    pub plot_pad_x: Padding,
    #[serde(default)]
    pub plot_pad_y: Padding,
    /// Widget border plus focus highlight thickness.
    #[serde(default = "default_inset")]
    pub inset: f64,
    #[serde(default = "default_plot_border_width")]
    pub plot_border_width: f64,
    /// A solid plot border already draws the axis baseline.
    #[serde(default)]
    pub plot_border_solid: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_title_font")]
    pub title_font: FontSpec,
    #[serde(default)]
    pub bar_mode: BarMode,
    #[serde(default)]
    pub bar_baseline: f64,
    #[serde(default)]
    pub layout_strategy: LayoutStrategy,
}

impl GraphConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            inverted: false,
            stack_axes: false,
            aspect: None,
            plot_width: None,
            plot_height: None,
            margins: MarginRequest::default(),
            plot_pad_x: Padding::default(),
            plot_pad_y: Padding::default(),
            inset: default_inset(),
            plot_border_width: default_plot_border_width(),
            plot_border_solid: false,
            title: None,
            title_font: default_title_font(),
            bar_mode: BarMode::Normal,
            bar_baseline: 0.0,
            layout_strategy: LayoutStrategy::SinglePass,
        }
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    #[must_use]
    pub fn with_stack_axes(mut self, stack_axes: bool) -> Self {
        self.stack_axes = stack_axes;
        self
    }

    #[must_use]
    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = Some(aspect);
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: MarginRequest) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_bar_mode(mut self, bar_mode: BarMode) -> Self {
        self.bar_mode = bar_mode;
        self
    }

    #[must_use]
    pub fn with_layout_strategy(mut self, strategy: LayoutStrategy) -> Self {
        self.layout_strategy = strategy;
        self
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GraphError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GraphError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

pub(super) fn validate_graph_config(config: &GraphConfig) -> GraphResult<()> {
    if let Some(aspect) = config.aspect {
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "aspect ratio must be finite and > 0, got {aspect}"
            )));
        }
    }
    for (name, size) in [
        ("plot width", config.plot_width),
        ("plot height", config.plot_height),
        ("left margin", config.margins.left),
        ("right margin", config.margins.right),
        ("top margin", config.margins.top),
        ("bottom margin", config.margins.bottom),
    ] {
        if let Some(size) = size {
            if !size.is_finite() || size <= 0.0 {
                return Err(GraphError::InvalidConfig(format!(
                    "{name} must be finite and > 0, got {size}"
                )));
            }
        }
    }
    for (name, value) in [
        ("plot pad x", config.plot_pad_x.side1),
        ("plot pad x", config.plot_pad_x.side2),
        ("plot pad y", config.plot_pad_y.side1),
        ("plot pad y", config.plot_pad_y.side2),
        ("inset", config.inset),
        ("plot border width", config.plot_border_width),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "{name} must be finite and >= 0, got {value}"
            )));
        }
    }
    if !config.title_font.size_px.is_finite() || config.title_font.size_px <= 0.0 {
        return Err(GraphError::InvalidConfig(
            "title font size must be finite and > 0".to_owned(),
        ));
    }
    if !config.bar_baseline.is_finite() {
        return Err(GraphError::InvalidConfig(
            "bar baseline must be finite".to_owned(),
        ));
    }
    if let LayoutStrategy::Converge { max_iterations } = config.layout_strategy {
        if max_iterations == 0 {
            return Err(GraphError::InvalidConfig(
                "converging layout needs at least one iteration".to_owned(),
            ));
        }
    }
    Ok(())
}

fn default_inset() -> f64 {
    2.0
}

fn default_plot_border_width() -> f64 {
    1.0
}

fn default_title_font() -> FontSpec {
    FontSpec::new("Sans", 14.0)
}
