use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{AxisClass, MarginSide, Orientation, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::text::{EstimatedTextMetrics, TextMetrics};

use super::graph_config::validate_graph_config;
use super::{
    Axis, AxisOptions, BarStacks, GraphConfig, GraphLayout, HiddenLegend, LegendSizer,
    PlotElement, TickLabelFormatterFn,
};

/// Axis names assigned to one margin, in display order.
pub(super) type MarginAxes = SmallVec<[String; 4]>;

/// Reset state of the axis ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisResetState {
    Clean,
    /// Data or configuration changed; mapping results are stale until the
    /// next reset.
    #[default]
    RangesDirty,
}

/// Axis engine of one graph widget.
///
/// `Graph` owns the axes, their margin assignment and the last computed
/// layout. Hosts feed it element data through [`Graph::update`] (or the
/// separate reset/layout steps) and query the mapping functions afterwards.
pub struct Graph<M: TextMetrics = EstimatedTextMetrics> {
    pub(super) config: GraphConfig,
    pub(super) axes: IndexMap<String, Axis>,
    pub(super) margins: [MarginAxes; 4],
    pub(super) metrics: M,
    pub(super) legend: Box<dyn LegendSizer>,
    pub(super) label_formatter: Option<TickLabelFormatterFn>,
    pub(super) widget_path: String,
    pub(super) reset_state: AxisResetState,
    pub(super) layout_needed: bool,
    pub(super) redraw_needed: bool,
    pub(super) layout: GraphLayout,
    pub(super) stacks: BarStacks,
}

impl Graph<EstimatedTextMetrics> {
    /// Creates a graph measuring text with [`EstimatedTextMetrics`].
    pub fn new(config: GraphConfig) -> GraphResult<Self> {
        Self::with_metrics(config, EstimatedTextMetrics)
    }
}

impl<M: TextMetrics> Graph<M> {
    /// Creates a graph with the default axes `x` (bottom), `y` (left),
    /// `x2` (top) and `y2` (right). The secondary axes start hidden.
    pub fn with_metrics(config: GraphConfig, metrics: M) -> GraphResult<Self> {
        validate_graph_config(&config)?;
        let mut graph = Self {
            config,
            axes: IndexMap::new(),
            margins: Default::default(),
            metrics,
            legend: Box::new(HiddenLegend),
            label_formatter: None,
            widget_path: ".graph".to_owned(),
            reset_state: AxisResetState::RangesDirty,
            layout_needed: true,
            redraw_needed: true,
            layout: GraphLayout::default(),
            stacks: BarStacks::default(),
        };

        let inverted = graph.config.inverted;
        for (name, side, hidden) in [
            ("x", MarginSide::Bottom, false),
            ("y", MarginSide::Left, false),
            ("x2", MarginSide::Top, true),
            ("y2", MarginSide::Right, true),
        ] {
            // Inverted graphs start with X axes in the vertical margins.
            let side = if inverted { swap_side(side) } else { side };
            let class = side.axis_class(inverted);
            let mut axis = Axis::new(name, class, AxisOptions::default().with_hidden(hidden));
            axis.margin = Some(side);
            axis.orientation = Orientation::resolve(class, inverted);
            graph.margins[side.index()].push(name.to_owned());
            graph.axes.insert(name.to_owned(), axis);
        }
        debug!(axes = graph.axes.len(), "graph created");
        Ok(graph)
    }

    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Replaces the graph configuration. Toggling `inverted` moves every
    /// axis to the margin matching its class in the new orientation.
    pub fn set_config(&mut self, config: GraphConfig) -> GraphResult<()> {
        validate_graph_config(&config)?;
        let inversion_changed = config.inverted != self.config.inverted;
        self.config = config;
        if inversion_changed {
            self.margins.swap(MarginSide::Bottom.index(), MarginSide::Left.index());
            self.margins.swap(MarginSide::Top.index(), MarginSide::Right.index());
            for side in MarginSide::ALL {
                for name in &self.margins[side.index()] {
                    if let Some(axis) = self.axes.get_mut(name) {
                        axis.margin = Some(side);
                    }
                }
            }
        }
        let inverted = self.config.inverted;
        for axis in self.axes.values_mut() {
            axis.orientation = Orientation::resolve(axis.class, inverted);
        }
        self.mark_ranges_dirty();
        Ok(())
    }

    /// Records a new window size from the host toolkit.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.config.viewport != viewport {
            self.config.viewport = viewport;
            self.layout_needed = true;
            self.redraw_needed = true;
        }
    }

    #[must_use]
    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    pub fn set_legend_sizer(&mut self, sizer: impl LegendSizer + 'static) {
        self.legend = Box::new(sizer);
        self.layout_needed = true;
        self.redraw_needed = true;
    }

    pub fn set_tick_label_formatter(&mut self, formatter: TickLabelFormatterFn) {
        self.label_formatter = Some(formatter);
        self.layout_needed = true;
        self.redraw_needed = true;
    }

    pub fn clear_tick_label_formatter(&mut self) {
        self.label_formatter = None;
        self.layout_needed = true;
        self.redraw_needed = true;
    }

    /// Path passed to the tick label formatting hook.
    #[must_use]
    pub fn widget_path(&self) -> &str {
        &self.widget_path
    }

    pub fn set_widget_path(&mut self, path: impl Into<String>) {
        self.widget_path = path.into();
    }

    #[must_use]
    pub fn reset_state(&self) -> AxisResetState {
        self.reset_state
    }

    /// Mapping results are only trustworthy once this returns `false`.
    #[must_use]
    pub fn needs_reset(&self) -> bool {
        self.reset_state == AxisResetState::RangesDirty
    }

    #[must_use]
    pub fn needs_layout(&self) -> bool {
        self.layout_needed
    }

    /// Flags the axis ranges as stale, e.g. after element data changed.
    pub fn mark_ranges_dirty(&mut self) {
        self.reset_state = AxisResetState::RangesDirty;
        self.layout_needed = true;
        self.redraw_needed = true;
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_needed)
    }

    /// Last computed layout.
    #[must_use]
    pub fn layout(&self) -> &GraphLayout {
        &self.layout
    }

    /// Serializes the last layout to pretty JSON.
    pub fn layout_json(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(&self.layout)
            .map_err(|e| GraphError::InvalidConfig(format!("failed to serialize layout: {e}")))
    }

    /// Stacked bar sums folded during the last reset.
    #[must_use]
    pub fn bar_stacks(&self) -> &BarStacks {
        &self.stacks
    }

    /// Runs whatever is pending: the axis reset when ranges are dirty, then
    /// the margin layout when needed.
    pub fn update<E: PlotElement>(&mut self, elements: &[E]) -> GraphResult<&GraphLayout> {
        if self.needs_reset() {
            self.reset_axes(elements)?;
        }
        if self.layout_needed {
            self.compute_layout()?;
        }
        Ok(&self.layout)
    }

    pub(super) fn axis_class_for(&self, side: MarginSide) -> AxisClass {
        side.axis_class(self.config.inverted)
    }
}

fn swap_side(side: MarginSide) -> MarginSide {
    match side {
        MarginSide::Bottom => MarginSide::Left,
        MarginSide::Left => MarginSide::Bottom,
        MarginSide::Top => MarginSide::Right,
        MarginSide::Right => MarginSide::Top,
    }
}
