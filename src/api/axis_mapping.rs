use crate::core::{AxisTransform, Point, inv_map_2d, map_2d};
use crate::error::GraphResult;
use crate::text::TextMetrics;

use super::{AxisPair, Graph};

impl<M: TextMetrics> Graph<M> {
    /// Snapshot of everything needed to map values of `axis`.
    pub fn axis_transform(&self, axis: &str) -> GraphResult<AxisTransform> {
        Ok(self.axis(axis)?.transform())
    }

    pub fn to_screen(&self, axis: &str, value: f64) -> GraphResult<f64> {
        Ok(self.axis(axis)?.transform().to_screen(value))
    }

    pub fn from_screen(&self, axis: &str, coordinate: f64) -> GraphResult<f64> {
        Ok(self.axis(axis)?.transform().from_screen(coordinate))
    }

    /// Maps a data point through an axis pair, honoring `inverted`.
    pub fn map_2d(&self, x: f64, y: f64, axes: &AxisPair) -> GraphResult<Point> {
        let x_axis = self.axis_transform(&axes.x)?;
        let y_axis = self.axis_transform(&axes.y)?;
        Ok(map_2d(x, y, &x_axis, &y_axis, self.config.inverted))
    }

    /// Maps a screen point back to `(x, y)` data values.
    pub fn inv_map_2d(&self, screen_x: f64, screen_y: f64, axes: &AxisPair) -> GraphResult<Point> {
        let x_axis = self.axis_transform(&axes.x)?;
        let y_axis = self.axis_transform(&axes.y)?;
        Ok(inv_map_2d(
            screen_x,
            screen_y,
            &x_axis,
            &y_axis,
            self.config.inverted,
        ))
    }

    /// Display limits of `axis` in data units.
    pub fn axis_limits(&self, axis: &str) -> GraphResult<(f64, f64)> {
        Ok(self.axis(axis)?.limits())
    }
}
