use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use super::{AxisPair, PlotElement};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StackKey {
    axes: AxisPair,
    x: OrderedFloat<f64>,
}

/// Per-(axes, x) sums of stacked bar values.
#[derive(Debug, Clone, Default)]
pub struct BarStacks {
    sums: IndexMap<StackKey, f64>,
}

impl BarStacks {
    /// Sums the y values of every visible bar element sharing an x value on
    /// the same axis pair.
    #[must_use]
    pub fn from_elements<E: PlotElement>(elements: &[E]) -> Self {
        let mut sums = IndexMap::new();
        for element in elements.iter().filter(|element| !element.is_hidden()) {
            let Some((xs, ys)) = element.bar_samples() else {
                continue;
            };
            for (&x, &y) in xs.iter().zip(ys) {
                if !x.is_finite() || !y.is_finite() {
                    continue;
                }
                let key = StackKey {
                    axes: element.axes().clone(),
                    x: OrderedFloat(x),
                };
                *sums.entry(key).or_insert(0.0) += y;
            }
        }
        Self { sums }
    }

    #[must_use]
    pub fn sum(&self, axes: &AxisPair, x: f64) -> Option<f64> {
        let key = StackKey {
            axes: axes.clone(),
            x: OrderedFloat(x),
        };
        self.sums.get(&key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// `(axes, x, sum)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&AxisPair, f64, f64)> + '_ {
        self.sums
            .iter()
            .map(|(key, sum)| (&key.axes, key.x.into_inner(), *sum))
    }
}
