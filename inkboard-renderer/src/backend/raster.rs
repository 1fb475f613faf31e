//! tiny-skia raster surface.
//!
//! The primary backend: strokes are rasterized into an anti-aliased RGBA
//! pixmap that can be inspected pixel by pixel or encoded as PNG.

use inkboard_core::Point;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

use crate::{LineCap, LineJoin, RenderError, RenderResult, Rgba, StrokeStyle};

use super::Surface;

/// Pixmap-backed surface.
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    /// Create a transparent surface of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Surface`] if either dimension is zero or the
    /// pixmap is too large to allocate.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Surface(format!("cannot allocate a {width}x{height} pixmap"))
        })?;
        Ok(Self { pixmap })
    }

    /// The underlying pixmap (premultiplied RGBA).
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Raw premultiplied RGBA bytes, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Read one pixel as straight-alpha RGBA.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    /// Number of pixels with any coverage.
    #[must_use]
    pub fn painted_pixel_count(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    /// Composite the surface over a solid background.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Surface`] if the output pixmap cannot be allocated.
    pub fn flatten(&self, background: Rgba) -> RenderResult<Pixmap> {
        let mut out = Pixmap::new(self.pixmap.width(), self.pixmap.height())
            .ok_or_else(|| RenderError::Surface("cannot allocate output pixmap".to_string()))?;
        out.fill(Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            background.a,
        ));
        out.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(out)
    }

    /// Encode the surface as PNG bytes, keeping transparency.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Export`] if encoding fails.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        encode_png(&self.pixmap)
    }

    /// Composite the surface over `background` and encode it as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the output pixmap cannot be allocated or encoding
    /// fails.
    pub fn to_png(&self, background: Rgba) -> RenderResult<Vec<u8>> {
        encode_png(&self.flatten(background)?)
    }
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish_non_exhaustive()
    }
}

/// Encode a pixmap as PNG bytes.
fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
}

/// tiny-skia works in `f32` device space.
#[allow(clippy::cast_possible_truncation)]
fn narrow(value: f64) -> f32 {
    value as f32
}

fn sk_line_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

fn sk_line_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) -> RenderResult<()> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };

        let mut builder = PathBuilder::new();
        builder.move_to(narrow(first.x), narrow(first.y));
        for point in rest {
            builder.line_to(narrow(point.x), narrow(point.y));
        }
        let path = builder
            .finish()
            .ok_or_else(|| RenderError::Stroke("degenerate path".to_string()))?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(style.color.r, style.color.g, style.color.b, style.color.a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: narrow(style.width),
            line_cap: sk_line_cap(style.cap),
            line_join: sk_line_join(style.join),
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_surface_is_rejected() {
        assert!(RasterSurface::new(0, 10).is_err());
        assert!(RasterSurface::new(10, 0).is_err());
    }

    #[test]
    fn test_horizontal_segment_paints_its_pixels() {
        let mut surface = RasterSurface::new(100, 100).expect("surface");
        surface.clear();
        surface
            .stroke_polyline(
                &[Point::new(10.0, 50.0), Point::new(90.0, 50.0)],
                &StrokeStyle::round(Rgba::rgb(255, 0, 0), 6.0),
            )
            .expect("stroke");

        assert_eq!(surface.pixel(50, 50), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(surface.pixel(50, 10), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixel(50, 90), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_clear_erases_everything() {
        let mut surface = RasterSurface::new(20, 20).expect("surface");
        surface
            .stroke_polyline(
                &[Point::new(0.0, 10.0), Point::new(20.0, 10.0)],
                &StrokeStyle::round(Rgba::BLACK, 4.0),
            )
            .expect("stroke");
        assert!(surface.painted_pixel_count() > 0);

        surface.clear();
        assert_eq!(surface.painted_pixel_count(), 0);
    }

    #[test]
    fn test_flatten_and_png() {
        let surface = RasterSurface::new(8, 8).expect("surface");
        let flat = surface.flatten(Rgba::WHITE).expect("flatten");
        let corner = flat.pixel(0, 0).expect("pixel").demultiply();
        assert_eq!(corner.red(), 255);
        assert_eq!(corner.alpha(), 255);

        let png = surface.encode_png().expect("png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }
}
