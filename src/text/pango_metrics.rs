use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{GraphError, GraphResult};
use crate::text::{FontSpec, TextExtent, TextMetrics};

/// Text measurement through Pango on a scratch cairo surface.
#[derive(Debug)]
pub struct PangoTextMetrics {
    context: Context,
}

impl PangoTextMetrics {
    pub fn new() -> GraphResult<Self> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self { context })
    }

    /// Measures on a caller-provided context, e.g. the one a toolkit draw
    /// callback hands out, so font options match the real output.
    #[must_use]
    pub fn with_context(context: Context) -> Self {
        Self { context }
    }
}

impl TextMetrics for PangoTextMetrics {
    fn measure(&self, font: &FontSpec, text: &str) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description =
            FontDescription::from_string(&format!("{} {}px", font.family, font.size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);

        let (width, height) = layout.pixel_size();
        TextExtent {
            width: f64::from(width),
            height: f64::from(height),
        }
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> GraphError {
    GraphError::InvalidConfig(format!("{prefix}: {err}"))
}
