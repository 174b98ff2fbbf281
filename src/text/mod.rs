//! Font-metrics contract used to size tick labels and titles.

use serde::{Deserialize, Serialize};

#[cfg(feature = "cairo-backend")]
mod pango_metrics;
#[cfg(feature = "cairo-backend")]
pub use pango_metrics::PangoTextMetrics;

/// Font selection passed through to the metrics provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Sans", 12.0)
    }
}

/// Measured size of a (possibly multi-line) string, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Measures text for layout. Implemented by the host toolkit.
pub trait TextMetrics {
    fn measure(&self, font: &FontSpec, text: &str) -> TextExtent;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, font: &FontSpec, text: &str) -> TextExtent {
        (**self).measure(font, text)
    }
}

/// Deterministic, backend-independent text measurement based on average
/// glyph advances. Used when no real font engine is available.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimatedTextMetrics;

impl EstimatedTextMetrics {
    /// Line height relative to the font size.
    pub const LINE_SPACING: f64 = 1.2;
}

impl TextMetrics for EstimatedTextMetrics {
    fn measure(&self, font: &FontSpec, text: &str) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        let mut width: f64 = 0.0;
        let mut lines = 0_u32;
        for line in text.split('\n') {
            lines += 1;
            width = width.max(estimate_line_width(line, font.size_px));
        }
        TextExtent {
            width: width.ceil(),
            height: (f64::from(lines) * font.size_px * Self::LINE_SPACING).ceil(),
        }
    }
}

fn estimate_line_width(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    units * font_size_px
}

#[cfg(test)]
mod tests {
    use super::{EstimatedTextMetrics, FontSpec, TextMetrics};

    #[test]
    fn multi_line_text_stacks_line_heights() {
        let font = FontSpec::new("Sans", 10.0);
        let single = EstimatedTextMetrics.measure(&font, "100");
        let double = EstimatedTextMetrics.measure(&font, "100\n2000");
        assert_eq!(single.height, 12.0);
        assert_eq!(double.height, 24.0);
        assert!(double.width > single.width);
    }

    #[test]
    fn empty_text_has_no_extent() {
        let extent = EstimatedTextMetrics.measure(&FontSpec::default(), "");
        assert_eq!((extent.width, extent.height), (0.0, 0.0));
    }
}
