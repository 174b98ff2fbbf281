use crate::core::{Point, rotated_bounding_box};
use crate::text::TextMetrics;

use super::label_format::make_tick_label;
use super::{Axis, AxisGeometry, TickLabel, TickLabelFormatterFn};

/// Gap between the axis line, tick labels and the title.
pub(super) const AXIS_TITLE_PAD: f64 = 2.0;

/// Inputs shared by every axis measured in one layout pass.
pub(super) struct GeometryContext<'a, M: TextMetrics> {
    pub metrics: &'a M,
    pub widget_path: &'a str,
    pub formatter: Option<&'a TickLabelFormatterFn>,
    pub plot_border_solid: bool,
}

/// Regenerates the tick labels of `axis` and computes the space it needs
/// perpendicular to its direction.
///
/// Labels whose position falls outside the axis range are dropped in the
/// same pass that measures them. With `title_adjoining` the title is drawn
/// in the neighboring margin and only bounds the thickness from below.
pub(super) fn estimate_axis_geometry<M: TextMetrics>(
    axis: &mut Axis,
    context: &GeometryContext<'_, M>,
    title_adjoining: bool,
) {
    let options = &axis.options;
    let horizontal = axis.orientation.is_horizontal();
    let range = axis.scale.range;

    let mut thickness = 0.0;
    if options.exterior_ticks && !context.plot_border_solid {
        thickness += options.line_width + 2.0;
    }

    let mut labels = Vec::new();
    let (mut max_tick_width, mut max_tick_height) = (0.0_f64, 0.0_f64);
    if options.show_ticks {
        for (index, &tick) in axis.major_ticks.iter().enumerate() {
            let position = if options.label_offset {
                // Offset labels center on the interval; the last explicit
                // tick has none.
                match axis.major_interval(index) {
                    Some(interval) => tick + interval * 0.5,
                    None => continue,
                }
            } else {
                tick
            };
            if !range.contains(position) {
                continue;
            }
            let text = make_tick_label(
                tick,
                options.log_scale,
                context.widget_path,
                context.formatter,
            );
            let extent = context.metrics.measure(&options.tick_font, &text);
            let rotated = rotated_bounding_box(extent.width, extent.height, options.tick_angle);
            let (width, height) = (rotated.width.round(), rotated.height.round());
            max_tick_width = max_tick_width.max(width);
            max_tick_height = max_tick_height.max(height);
            labels.push(TickLabel {
                value: tick,
                position,
                text,
                width,
                height,
                anchor: Point::default(),
            });
        }

        let pad = if options.exterior_ticks {
            options.line_width * 1.5
        } else {
            0.0
        };
        thickness += pad
            + if horizontal {
                max_tick_height
            } else {
                max_tick_width
            };
        if options.line_width > 0.0 {
            thickness += AXIS_TITLE_PAD + options.tick_length.abs();
        }
    }

    let (mut title_width, mut title_height) = (0.0, 0.0);
    if let Some(title) = options.title.as_deref().filter(|title| !title.is_empty()) {
        let extent = context.metrics.measure(&options.title_font, title);
        (title_width, title_height) = (extent.width, extent.height);
        if title_adjoining {
            let across = if horizontal { title_height } else { title_width };
            thickness = f64::max(thickness, across);
        } else {
            // Vertical titles are rotated, so the text height is the
            // footprint on both orientations.
            thickness += title_height + AXIS_TITLE_PAD;
        }
    }

    axis.labels = labels;
    axis.geometry = AxisGeometry {
        thickness,
        max_tick_width,
        max_tick_height,
        title_width,
        title_height,
    };
}

#[cfg(test)]
mod tests {
    use super::{GeometryContext, estimate_axis_geometry};
    use crate::api::{Axis, AxisOptions};
    use crate::core::{AxisClass, AxisRange, Orientation};
    use crate::text::{FontSpec, TextExtent, TextMetrics};

    /// Every string measures 7 px per char and 10 px high.
    struct MonoMetrics;

    impl TextMetrics for MonoMetrics {
        fn measure(&self, _font: &FontSpec, text: &str) -> TextExtent {
            TextExtent {
                width: 7.0 * text.chars().count() as f64,
                height: 10.0,
            }
        }
    }

    fn context(metrics: &MonoMetrics) -> GeometryContext<'_, MonoMetrics> {
        GeometryContext {
            metrics,
            widget_path: ".g",
            formatter: None,
            plot_border_solid: false,
        }
    }

    #[test]
    fn horizontal_axis_reports_label_height_plus_pads() {
        let mut axis = Axis::new("x", AxisClass::X, AxisOptions::default());
        axis.orientation = Orientation::Horizontal;
        axis.scale.range = AxisRange::new(0.0, 100.0);
        axis.major_ticks = vec![0.0, 50.0, 100.0, 150.0];
        estimate_axis_geometry(&mut axis, &context(&MonoMetrics), false);

        // 150 is outside the range and never measured.
        assert_eq!(axis.labels().len(), 3);
        let geometry = axis.geometry();
        assert_eq!(geometry.max_tick_width, 21.0);
        // (1 + 2) baseline + 10 label + 1.5 pad + 2 title pad + 4 tick.
        assert_eq!(geometry.thickness, 20.5);
    }

    #[test]
    fn quarter_turn_labels_swap_width_and_height() {
        let options = AxisOptions {
            tick_angle: 90.0,
            ..AxisOptions::default()
        };
        let mut axis = Axis::new("y", AxisClass::Y, options);
        axis.orientation = Orientation::Vertical;
        axis.scale.range = AxisRange::new(0.0, 100.0);
        axis.major_ticks = vec![0.0, 50.0, 100.0];
        estimate_axis_geometry(&mut axis, &context(&MonoMetrics), false);

        let geometry = axis.geometry();
        assert_eq!(geometry.max_tick_width, 10.0);
        assert_eq!(geometry.max_tick_height, 21.0);
        // (1 + 2) baseline + 1.5 pad + 10 rotated label + 2 title pad + 4 tick.
        assert_eq!(geometry.thickness, 20.5);
    }

    #[test]
    fn adjoining_title_only_bounds_the_thickness() {
        let options = AxisOptions {
            show_ticks: false,
            exterior_ticks: false,
            title_alternate: true,
            ..AxisOptions::default().with_title("volts")
        };
        let mut axis = Axis::new("y", AxisClass::Y, options);
        axis.orientation = Orientation::Vertical;
        estimate_axis_geometry(&mut axis, &context(&MonoMetrics), true);
        assert_eq!(axis.geometry().thickness, 35.0);

        estimate_axis_geometry(&mut axis, &context(&MonoMetrics), false);
        assert_eq!(axis.geometry().thickness, 12.0);
    }
}
