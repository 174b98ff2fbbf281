mod axis;
mod axis_config;
mod axis_geometry;
mod axis_mapping;
mod axis_registry;
mod axis_reset;
mod axis_view;
mod bar_stacks;
mod elements;
mod graph;
mod graph_config;
mod label_format;
mod legend;
mod margin_layout;

pub use axis::{Axis, AxisGeometry, AxisPlacement, TickLabel};
pub use axis_config::AxisOptions;
pub use bar_stacks::BarStacks;
pub use elements::{AxisPair, DataExtents, Element, ElementKind, ExtentQuery, PlotElement};
pub use graph::{AxisResetState, Graph};
pub use graph_config::{BarMode, GraphConfig, LayoutStrategy, MarginRequest};
pub use label_format::{
    TICK_LABEL_MAX_CHARS, TickLabelFormatterFn, default_tick_label, format_general,
};
pub use legend::{FixedLegend, HiddenLegend, LegendGeometry, LegendSite, LegendSizer};
pub use margin_layout::{
    GraphLayout, MIN_MARGIN_PX, MarginFootprint, MarginLayout, solve_margins,
};
