use tracing::debug;

use crate::core::{AxisClass, MarginSide, Orientation};
use crate::error::{GraphError, GraphResult};
use crate::text::TextMetrics;

use super::axis_config::normalize_axis_options;
use super::axis_reset::rescale_axis;
use super::{Axis, AxisOptions, Graph};

impl<M: TextMetrics> Graph<M> {
    /// Creates a new, unassigned axis.
    ///
    /// The options are scaled against an empty extent first, so a step
    /// that overflows the tick limit is rejected here.
    pub fn create_axis(
        &mut self,
        name: &str,
        class: AxisClass,
        options: AxisOptions,
    ) -> GraphResult<()> {
        if let Some(existing) = self.axes.get(name) {
            if existing.delete_pending {
                return Err(GraphError::AxisInUse(name.to_owned()));
            }
            return Err(GraphError::DuplicateAxis(name.to_owned()));
        }
        let options = normalize_axis_options(name, options)?;
        let mut axis = Axis::new(name, class, options);
        axis.orientation = Orientation::resolve(class, self.config.inverted);
        rescale_axis(&mut axis)?;
        self.axes.insert(name.to_owned(), axis);
        debug!(axis = name, %class, "axis created");
        self.mark_ranges_dirty();
        Ok(())
    }

    /// Replaces the options of an axis.
    ///
    /// The new options are applied to a copy of the axis and rescaled
    /// against its current data extent; the axis is only updated when that
    /// succeeds.
    pub fn configure_axis(&mut self, name: &str, options: AxisOptions) -> GraphResult<()> {
        let axis = self.axis(name)?;
        let options = normalize_axis_options(name, options)?;
        let mut staged = axis.clone();
        staged.options = options;
        rescale_axis(&mut staged)?;
        self.axes.insert(name.to_owned(), staged);
        self.mark_ranges_dirty();
        Ok(())
    }

    pub fn axis(&self, name: &str) -> GraphResult<&Axis> {
        self.axes
            .get(name)
            .filter(|axis| !axis.delete_pending)
            .ok_or_else(|| GraphError::UnknownAxis(name.to_owned()))
    }

    /// Names of live axes in creation order.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.axes
            .values()
            .filter(|axis| !axis.delete_pending)
            .map(Axis::name)
    }

    /// Deletes an axis. While elements still hold references the axis is
    /// only marked and removed by the last [`Graph::release_axis`].
    pub fn delete_axis(&mut self, name: &str) -> GraphResult<()> {
        let axis = self
            .axes
            .get_mut(name)
            .filter(|axis| !axis.delete_pending)
            .ok_or_else(|| GraphError::UnknownAxis(name.to_owned()))?;
        if let Some(side) = axis.margin.take() {
            self.margins[side.index()].retain(|assigned| assigned.as_str() != name);
        }
        if axis.ref_count > 0 {
            axis.delete_pending = true;
            debug!(axis = name, refs = axis.ref_count, "axis delete deferred");
        } else {
            self.axes.shift_remove(name);
            debug!(axis = name, "axis deleted");
        }
        self.mark_ranges_dirty();
        Ok(())
    }

    /// Records a reference from an element to an axis.
    pub fn retain_axis(&mut self, name: &str) -> GraphResult<()> {
        let axis = self
            .axes
            .get_mut(name)
            .filter(|axis| !axis.delete_pending)
            .ok_or_else(|| GraphError::UnknownAxis(name.to_owned()))?;
        axis.ref_count += 1;
        Ok(())
    }

    /// Drops a reference. Returns `true` when this released a pending
    /// delete and the axis is gone.
    pub fn release_axis(&mut self, name: &str) -> GraphResult<bool> {
        let axis = self
            .axes
            .get_mut(name)
            .ok_or_else(|| GraphError::UnknownAxis(name.to_owned()))?;
        axis.ref_count = axis.ref_count.saturating_sub(1);
        if axis.ref_count == 0 && axis.delete_pending {
            self.axes.shift_remove(name);
            debug!(axis = name, "axis deleted after last release");
            return Ok(true);
        }
        Ok(false)
    }

    /// Assigns the axes displayed in `side`, replacing its previous list.
    ///
    /// The margin decides the axis class: bottom and top hold X axes unless
    /// the graph is inverted. Axes move out of any margin they were in.
    pub fn use_axes(&mut self, side: MarginSide, names: &[&str]) -> GraphResult<()> {
        let expected = self.axis_class_for(side);
        for name in names {
            let axis = self.axis(name)?;
            if axis.class != expected {
                return Err(GraphError::WrongAxisClass {
                    name: (*name).to_owned(),
                    expected,
                });
            }
        }

        for previous in std::mem::take(&mut self.margins[side.index()]) {
            if let Some(axis) = self.axes.get_mut(&previous) {
                axis.margin = None;
            }
        }
        for name in names {
            if let Some(axis) = self.axes.get_mut(*name) {
                if let Some(old_side) = axis.margin.replace(side) {
                    self.margins[old_side.index()]
                        .retain(|assigned| assigned.as_str() != *name);
                }
            }
            let list = &mut self.margins[side.index()];
            if !list.iter().any(|assigned| assigned.as_str() == *name) {
                list.push((*name).to_owned());
            }
        }
        self.layout_needed = true;
        self.redraw_needed = true;
        Ok(())
    }

    /// Axis names displayed in `side`.
    #[must_use]
    pub fn margin_axes(&self, side: MarginSide) -> &[String] {
        &self.margins[side.index()]
    }
}
