//! Document export to image formats.
//!
//! PNG output runs the regular render pipeline on a [`RasterSurface`] and
//! composites the result over a background color. SVG output writes one
//! `<path>` per drawable stroke, skipping the same objects the pipeline
//! skips.
//!
//! [`RasterSurface`]: crate::RasterSurface

use std::fmt::Write;

use inkboard_core::{DrawableObject, StrokeObject};

use crate::error::RenderResult;
use crate::Rgba;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// SVG vector graphics (returns the SVG XML string as UTF-8 bytes).
    Svg,
}

impl ExportFormat {
    /// Guess the format from a file extension (`png` or `svg`, any case).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

/// Configuration for document export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Background color painted under the strokes.
    pub background: Rgba,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Rgba::WHITE,
        }
    }
}

/// Exports a document's objects to image formats.
#[derive(Debug, Clone)]
pub struct DocumentExporter {
    config: ExportConfig,
}

impl DocumentExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The exporter configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export objects to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the objects cannot be rendered or encoded.
    pub fn export(&self, objects: &[DrawableObject], format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            #[cfg(feature = "raster")]
            ExportFormat::Png => self.render_to_png(objects),
            #[cfg(not(feature = "raster"))]
            ExportFormat::Png => Err(crate::RenderError::Export(
                "PNG export requires the `raster` feature".to_string(),
            )),
            ExportFormat::Svg => Ok(self.render_to_svg(objects).into_bytes()),
        }
    }

    /// Export objects to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be allocated or encoding fails.
    #[cfg(feature = "raster")]
    pub fn render_to_png(&self, objects: &[DrawableObject]) -> RenderResult<Vec<u8>> {
        let surface = crate::RasterSurface::new(self.config.width, self.config.height)?;
        let mut renderer = crate::Renderer::new(surface);
        let stats = renderer.render(objects);
        tracing::debug!(
            drawn = stats.drawn,
            skipped = stats.skipped.len(),
            "Rendered objects for PNG export"
        );

        renderer.surface().to_png(self.config.background)
    }

    /// Export objects to an SVG string.
    #[must_use]
    pub fn render_to_svg(&self, objects: &[DrawableObject]) -> String {
        let ExportConfig {
            width,
            height,
            background,
        } = self.config;

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        );
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"{background}\"/>"
        );

        for stroke in objects.iter().filter_map(DrawableObject::as_stroke) {
            render_stroke_svg(&mut svg, stroke);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render a single stroke as an SVG path.
fn render_stroke_svg(svg: &mut String, stroke: &StrokeObject) {
    if !stroke.is_drawable() {
        return;
    }
    let Ok(color) = Rgba::parse(&stroke.color) else {
        return;
    };

    let mut data = String::with_capacity(stroke.points.len() * 12);
    for (i, point) in stroke.points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(data, "{command}{},{} ", point.x, point.y);
    }

    let _ = write!(
        svg,
        "<path id=\"{}\" d=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
        escape_xml(stroke.id.as_str()),
        data.trim_end(),
        stroke.size,
    );
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
