use std::fmt;

use serde::{Deserialize, Serialize};

/// Window size reported by the hosting toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Size assumed for windows the toolkit has not mapped yet.
    pub const DEFAULT_SIZE: u32 = 400;

    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns the size used for layout, substituting the default for
    /// dimensions that are still zero.
    #[must_use]
    pub fn resolved(self) -> Self {
        let width = if self.width == 0 {
            Self::DEFAULT_SIZE
        } else {
            self.width
        };
        let height = if self.height == 0 {
            Self::DEFAULT_SIZE
        } else {
            self.height
        };
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in screen pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}

/// Padding applied on the two ends of one screen direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    /// Left or top.
    pub side1: f64,
    /// Right or bottom.
    pub side2: f64,
}

impl Padding {
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self {
            side1: value,
            side2: value,
        }
    }

    #[must_use]
    pub fn total(self) -> f64 {
        self.side1 + self.side2
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(8.0)
    }
}

/// Logical class of an axis. X axes map the abscissa of element data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisClass {
    X,
    Y,
}

impl fmt::Display for AxisClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Screen direction an axis runs along for the current layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Resolves the screen direction of an axis class. An inverted graph
    /// draws Y axes horizontally and X axes vertically.
    #[must_use]
    pub fn resolve(class: AxisClass, inverted: bool) -> Self {
        if (class == AxisClass::Y) == inverted {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        self == Self::Horizontal
    }
}

/// One of the four bands surrounding the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarginSide {
    Bottom,
    Left,
    Top,
    Right,
}

impl MarginSide {
    pub const ALL: [Self; 4] = [Self::Bottom, Self::Left, Self::Top, Self::Right];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Bottom => 0,
            Self::Left => 1,
            Self::Top => 2,
            Self::Right => 3,
        }
    }

    /// Bottom and top margins hold axes running horizontally.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }

    /// Axis class a margin accepts for the given inversion state.
    #[must_use]
    pub fn axis_class(self, inverted: bool) -> AxisClass {
        match (self.is_horizontal(), inverted) {
            (true, false) | (false, true) => AxisClass::X,
            (true, true) | (false, false) => AxisClass::Y,
        }
    }
}

impl fmt::Display for MarginSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}
