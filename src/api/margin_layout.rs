use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{MarginSide, Orientation, PlotRect, Point, ScreenWindow, Viewport};
use crate::error::GraphResult;
use crate::text::TextMetrics;

use super::axis_geometry::{AXIS_TITLE_PAD, GeometryContext, estimate_axis_geometry};
use super::{
    AxisPlacement, Graph, GraphConfig, LayoutStrategy, LegendGeometry, LegendSite, LegendSizer,
    MarginRequest,
};

/// Smallest size of any computed margin.
pub const MIN_MARGIN_PX: f64 = 3.0;
const LEGEND_PAD: f64 = 2.0;
const GRAPH_TITLE_PAD: f64 = 6.0;

const BOTTOM: usize = 0;
const LEFT: usize = 1;
const TOP: usize = 2;
const RIGHT: usize = 3;

/// Aggregate space needed by the axes of one margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MarginFootprint {
    /// Sum of axis thicknesses, or their maximum when axes are stacked.
    pub size: f64,
    pub max_tick_width: f64,
    pub max_tick_height: f64,
    /// Longest title drawn in the adjoining margin.
    pub axes_title_length: f64,
}

/// Final size and rectangle of one margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginLayout {
    pub side: MarginSide,
    /// Width of the left/right margins, height of the top/bottom ones.
    pub size: f64,
    pub rect: PlotRect,
    pub footprint: MarginFootprint,
    pub axes: Vec<String>,
}

impl MarginLayout {
    fn empty(side: MarginSide) -> Self {
        Self {
            side,
            size: 0.0,
            rect: PlotRect::default(),
            footprint: MarginFootprint::default(),
            axes: Vec::new(),
        }
    }
}

/// Result of a layout pass, consumed by drawing code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLayout {
    /// Window size used, grown when a requested plot size does not fit.
    pub viewport: Viewport,
    pub plot: PlotRect,
    /// Indexed by [`MarginSide::index`].
    pub margins: [MarginLayout; 4],
    /// Padded plot span mapped by horizontal axes.
    pub horizontal: ScreenWindow,
    /// Padded plot span mapped by vertical axes.
    pub vertical: ScreenWindow,
    pub legend: LegendGeometry,
    pub title_anchor: Option<Point>,
    /// Legend sizing rounds performed.
    pub iterations: u8,
}

impl GraphLayout {
    #[must_use]
    pub fn margin(&self, side: MarginSide) -> &MarginLayout {
        &self.margins[side.index()]
    }
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            plot: PlotRect::default(),
            margins: MarginSide::ALL.map(MarginLayout::empty),
            horizontal: ScreenWindow::default(),
            vertical: ScreenWindow::default(),
            legend: LegendGeometry::hidden(),
            title_anchor: None,
            iterations: 0,
        }
    }
}

impl<M: TextMetrics> Graph<M> {
    /// Measures the displayed axes, sizes the margins and writes screen
    /// windows and label anchors back to every axis.
    pub fn compute_layout(&mut self) -> GraphResult<&GraphLayout> {
        let inverted = self.config.inverted;
        let stack_axes = self.config.stack_axes;
        let context = GeometryContext {
            metrics: &self.metrics,
            widget_path: &self.widget_path,
            formatter: self.label_formatter.as_ref(),
            plot_border_solid: self.config.plot_border_solid,
        };

        for axis in self.axes.values_mut() {
            axis.orientation = Orientation::resolve(axis.class, inverted);
            if !axis.is_displayed() {
                axis.labels.clear();
                axis.geometry = Default::default();
            }
        }

        let mut footprints = [MarginFootprint::default(); 4];
        for side in MarginSide::ALL {
            let names = &self.margins[side.index()];
            let displayed = names
                .iter()
                .filter(|name| self.axes.get(*name).is_some_and(|axis| !axis.options.hidden))
                .count();
            let footprint = &mut footprints[side.index()];
            for name in names {
                let Some(axis) = self.axes.get_mut(name) else {
                    continue;
                };
                if axis.options.hidden {
                    continue;
                }
                let adjoining = axis.options.title_alternate || (stack_axes && displayed > 1);
                estimate_axis_geometry(axis, &context, adjoining);
                let geometry = axis.geometry;
                footprint.size = if stack_axes {
                    footprint.size.max(geometry.thickness)
                } else {
                    footprint.size + geometry.thickness
                };
                footprint.max_tick_width = footprint.max_tick_width.max(geometry.max_tick_width);
                footprint.max_tick_height =
                    footprint.max_tick_height.max(geometry.max_tick_height);
                if adjoining {
                    let length = if side.is_horizontal() {
                        geometry.title_width
                    } else {
                        geometry.title_height
                    };
                    footprint.axes_title_length = footprint.axes_title_length.max(length);
                }
            }
        }

        let title_height = self
            .config
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .map_or(0.0, |title| {
                self.metrics.measure(&self.config.title_font, title).height
            });

        let mut layout = solve_margins(&self.config, &footprints, title_height, &*self.legend);
        for side in MarginSide::ALL {
            layout.margins[side.index()].axes = self.margins[side.index()].to_vec();
        }
        self.layout = layout;
        self.place_axes();
        self.layout_needed = false;
        self.redraw_needed = true;

        let plot = self.layout.plot;
        debug!(
            left = plot.left,
            top = plot.top,
            right = plot.right,
            bottom = plot.bottom,
            iterations = self.layout.iterations,
            "graph layout"
        );
        Ok(&self.layout)
    }

    /// Writes screen windows, line positions and label anchors back to the
    /// axes from the current layout.
    fn place_axes(&mut self) {
        let layout = &self.layout;
        for axis in self.axes.values_mut() {
            axis.window = if axis.orientation.is_horizontal() {
                layout.horizontal
            } else {
                layout.vertical
            };
            axis.placement = AxisPlacement::default();
        }

        let stack_axes = self.config.stack_axes;
        let plot = layout.plot;
        for side in MarginSide::ALL {
            let names: Vec<&String> = self.margins[side.index()]
                .iter()
                .filter(|name| self.axes.get(*name).is_some_and(|axis| !axis.options.hidden))
                .collect();
            let full = if side.is_horizontal() {
                layout.horizontal
            } else {
                layout.vertical
            };
            let count = names.len();
            let stacked = stack_axes && count > 1;
            let mut offset = 0.0;
            for (index, name) in names.into_iter().enumerate() {
                let Some(axis) = self.axes.get_mut(name) else {
                    continue;
                };
                if stacked {
                    let slice = full.extent / count as f64;
                    axis.window = ScreenWindow::new(full.offset + slice * index as f64, slice);
                } else {
                    axis.window = full;
                }

                let line_position = match side {
                    MarginSide::Bottom => plot.bottom + offset,
                    MarginSide::Top => plot.top - offset,
                    MarginSide::Left => plot.left - offset,
                    MarginSide::Right => plot.right + offset,
                };
                let tick_extent = if axis.options.exterior_ticks && axis.options.line_width > 0.0 {
                    axis.options.tick_length.abs()
                } else {
                    0.0
                };
                let label_distance = tick_extent + AXIS_TITLE_PAD;
                axis.placement = AxisPlacement {
                    line_position,
                    label_distance,
                };

                let transform = axis.transform();
                for label in &mut axis.labels {
                    let along = transform.units_to_screen(label.position);
                    label.anchor = match side {
                        MarginSide::Bottom => Point::new(along, line_position + label_distance),
                        MarginSide::Top => Point::new(along, line_position - label_distance),
                        MarginSide::Left => Point::new(line_position - label_distance, along),
                        MarginSide::Right => Point::new(line_position + label_distance, along),
                    };
                }
                trace!(
                    axis = %axis.name,
                    %side,
                    offset = axis.window.offset,
                    extent = axis.window.extent,
                    line_position,
                    "axis placed"
                );
                if !stack_axes {
                    offset += axis.geometry.thickness;
                }
            }
        }
    }
}

/// Sizes the four margins and the plot area.
///
/// Single forward pass: measure, symmetrize opposing margins, apply
/// overrides, size the legend against the plot estimate, correct the
/// aspect ratio and make room for adjoining titles. With
/// [`LayoutStrategy::Converge`] the legend is re-sized against the
/// resulting plot until it stops changing.
pub fn solve_margins(
    config: &GraphConfig,
    footprints: &[MarginFootprint; 4],
    title_height: f64,
    legend: &dyn LegendSizer,
) -> GraphLayout {
    let viewport = config.viewport.resolved();
    let window = (f64::from(viewport.width), f64::from(viewport.height));

    let mut margins = footprints.map(|footprint| footprint.size.max(MIN_MARGIN_PX));

    // Tick labels at the plot corners may poke into the opposing margins.
    let pad = footprints[BOTTOM]
        .max_tick_width
        .max(footprints[TOP].max_tick_width)
        / 2.0
        + 3.0;
    margins[LEFT] = margins[LEFT].max(pad);
    margins[RIGHT] = margins[RIGHT].max(pad);
    let pad = footprints[LEFT]
        .max_tick_height
        .max(footprints[RIGHT].max_tick_height)
        / 2.0;
    margins[TOP] = margins[TOP].max(pad);
    margins[BOTTOM] = margins[BOTTOM].max(pad);

    apply_overrides(&mut margins, &config.margins);
    if title_height > 0.0 {
        margins[TOP] += title_height + GRAPH_TITLE_PAD;
    }

    let inset = config.inset + config.plot_border_width;
    let estimate_width = config
        .plot_width
        .unwrap_or(window.0 - (2.0 * inset + margins[LEFT] + margins[RIGHT]))
        .max(1.0);
    let estimate_height = config
        .plot_height
        .unwrap_or(window.1 - (2.0 * inset + margins[TOP] + margins[BOTTOM]))
        .max(1.0);

    let mut legend_geometry = legend.size_legend(estimate_width, estimate_height);
    let mut layout = finish_layout(
        config,
        footprints,
        margins,
        window,
        title_height,
        legend_geometry,
    );
    layout.iterations = 1;
    if let LayoutStrategy::Converge { max_iterations } = config.layout_strategy {
        while layout.iterations < max_iterations {
            let next = legend.size_legend(layout.plot.width(), layout.plot.height());
            if next == legend_geometry {
                break;
            }
            legend_geometry = next;
            let iterations = layout.iterations + 1;
            layout = finish_layout(
                config,
                footprints,
                margins,
                window,
                title_height,
                legend_geometry,
            );
            layout.iterations = iterations;
        }
    }
    layout
}

fn finish_layout(
    config: &GraphConfig,
    footprints: &[MarginFootprint; 4],
    base: [f64; 4],
    window: (f64, f64),
    title_height: f64,
    legend: LegendGeometry,
) -> GraphLayout {
    let mut margins = base;
    let (mut width, mut height) = window;
    let inset = config.inset + config.plot_border_width;
    let inset2 = 2.0 * inset;

    if !legend.hidden {
        let requested = &config.margins;
        match legend.site {
            LegendSite::Right if requested.right.is_none() => {
                margins[RIGHT] += legend.width + LEGEND_PAD;
            }
            LegendSite::Left if requested.left.is_none() => {
                margins[LEFT] += legend.width + LEGEND_PAD;
            }
            LegendSite::Top if requested.top.is_none() => {
                margins[TOP] += legend.height + LEGEND_PAD;
            }
            LegendSite::Bottom if requested.bottom.is_none() => {
                margins[BOTTOM] += legend.height + LEGEND_PAD;
            }
            _ => {}
        }
    }

    if let Some(aspect) = config.aspect {
        let plot_width = config
            .plot_width
            .unwrap_or(width - (inset2 + margins[LEFT] + margins[RIGHT]))
            .max(1.0);
        let plot_height = config
            .plot_height
            .unwrap_or(height - (inset2 + margins[TOP] + margins[BOTTOM]))
            .max(1.0);
        // The freed space goes to the right or top margin.
        if plot_width / plot_height > aspect {
            let scaled = (plot_height * aspect).max(1.0);
            margins[RIGHT] += plot_width - scaled;
        } else {
            let scaled = (plot_width / aspect).max(1.0);
            margins[TOP] += plot_height - scaled;
        }
    }

    margins[TOP] = margins[TOP]
        .max(footprints[LEFT].axes_title_length)
        .max(footprints[RIGHT].axes_title_length);
    margins[RIGHT] = margins[RIGHT]
        .max(footprints[BOTTOM].axes_title_length)
        .max(footprints[TOP].axes_title_length);

    apply_overrides(&mut margins, &config.margins);

    if let Some(plot_width) = config.plot_width {
        let needed = plot_width + inset2 + margins[LEFT] + margins[RIGHT];
        if width > needed {
            let extra = width - needed;
            split_extra(
                &mut margins,
                LEFT,
                RIGHT,
                extra,
                config.margins.left.is_some(),
                config.margins.right.is_some(),
            );
        } else {
            width = needed;
        }
    }
    if let Some(plot_height) = config.plot_height {
        let needed = plot_height + inset2 + margins[TOP] + margins[BOTTOM];
        if height > needed {
            let extra = height - needed;
            split_extra(
                &mut margins,
                TOP,
                BOTTOM,
                extra,
                config.margins.top.is_some(),
                config.margins.bottom.is_some(),
            );
        } else {
            height = needed;
        }
    }

    let left = margins[LEFT] + inset;
    let top = margins[TOP] + inset;
    let right = (width - margins[RIGHT] - inset).max(left + 1.0);
    let bottom = (height - margins[BOTTOM] - inset).max(top + 1.0);
    let plot = PlotRect::new(left, top, right, bottom);

    let horizontal = ScreenWindow::new(
        left + config.plot_pad_x.side1,
        plot.width() - config.plot_pad_x.total(),
    );
    let vertical = ScreenWindow::new(
        top + config.plot_pad_y.side1,
        plot.height() - config.plot_pad_y.total(),
    );

    let margin_rects = [
        PlotRect::new(0.0, height - margins[BOTTOM], width, height),
        PlotRect::new(0.0, 0.0, margins[LEFT], height),
        PlotRect::new(0.0, 0.0, width, margins[TOP]),
        PlotRect::new(width - margins[RIGHT], 0.0, width, height),
    ];
    let layout_margins = MarginSide::ALL.map(|side| MarginLayout {
        side,
        size: margins[side.index()],
        rect: margin_rects[side.index()],
        footprint: footprints[side.index()],
        axes: Vec::new(),
    });

    let title_anchor =
        (title_height > 0.0).then(|| Point::new((left + right) / 2.0, inset + title_height / 2.0));

    GraphLayout {
        viewport: Viewport::new(width.ceil() as u32, height.ceil() as u32),
        plot,
        margins: layout_margins,
        horizontal,
        vertical,
        legend,
        title_anchor,
        iterations: 0,
    }
}

fn apply_overrides(margins: &mut [f64; 4], requested: &MarginRequest) {
    for (index, size) in [
        (BOTTOM, requested.bottom),
        (LEFT, requested.left),
        (TOP, requested.top),
        (RIGHT, requested.right),
    ] {
        if let Some(size) = size {
            margins[index] = size;
        }
    }
}

/// Hands spare window space to the margins the user did not fix.
fn split_extra(
    margins: &mut [f64; 4],
    first: usize,
    second: usize,
    extra: f64,
    first_fixed: bool,
    second_fixed: bool,
) {
    match (first_fixed, second_fixed) {
        (false, false) => {
            margins[first] += extra / 2.0;
            margins[second] += extra / 2.0;
        }
        (false, true) => margins[first] += extra,
        (true, false) => margins[second] += extra,
        (true, true) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{MarginFootprint, split_extra, solve_margins};
    use crate::api::{GraphConfig, HiddenLegend};
    use crate::core::Viewport;

    #[test]
    fn margins_never_drop_below_three_pixels() {
        let config = GraphConfig::new(Viewport::new(200, 100));
        let layout = solve_margins(&config, &[MarginFootprint::default(); 4], 0.0, &HiddenLegend);
        for margin in &layout.margins {
            assert!(margin.size >= 3.0, "{:?}", margin.side);
        }
    }

    #[test]
    fn spare_space_goes_to_unfixed_margins() {
        let mut margins = [10.0; 4];
        split_extra(&mut margins, 1, 3, 20.0, true, false);
        assert_eq!(margins, [10.0, 10.0, 10.0, 30.0]);
    }
}
