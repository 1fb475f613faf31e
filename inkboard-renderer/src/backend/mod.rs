//! Drawing surfaces the render pipeline paints on.

#[cfg(feature = "raster")]
pub mod raster;
pub mod recording;

use inkboard_core::Point;

use crate::{RenderResult, Rgba};

/// How the ends of an open path are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat end exactly at the endpoint.
    Butt,
    /// Semicircular end centered on the endpoint.
    #[default]
    Round,
    /// Square end extending half the width past the endpoint.
    Square,
}

/// How consecutive segments of a path meet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineJoin {
    /// Sharp corner.
    Miter,
    /// Rounded corner.
    #[default]
    Round,
    /// Clipped corner.
    Bevel,
}

/// Paint parameters for one stroked path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgba,
    /// Line width in pixels.
    pub width: f64,
    /// End cap style.
    pub cap: LineCap,
    /// Join style.
    pub join: LineJoin,
}

impl StrokeStyle {
    /// A round-capped, round-joined style so consecutive segments blend
    /// without seams.
    #[must_use]
    pub fn round(color: Rgba, width: f64) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }
}

/// A 2D raster target with path-stroke primitives.
///
/// `stroke_polyline` is the equivalent of `beginPath`, `moveTo` the first
/// point, `lineTo` every following point and `stroke`: the points form one
/// continuous path.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Erase the whole surface to transparent.
    fn clear(&mut self);

    /// Stroke one continuous path through `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be drawn.
    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) -> RenderResult<()>;
}
