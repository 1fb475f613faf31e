//! # Inkboard Renderer
//!
//! Full-surface render pipeline for Inkboard documents.
//!
//! ## Rendering Backends
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            Surface Trait                    │
//! ├──────────────────────┬──────────────────────┤
//! │ RasterSurface        │ RecordingSurface     │
//! │ (tiny-skia pixmap)   │ (op log, headless)   │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Every render clears the whole surface and repaints every object in
//! order. There is no dirty-region tracking: output depends only on the
//! object list and the surface size, so rendering the same objects twice
//! gives identical pixels.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod color;
pub mod error;
pub mod export;

#[cfg(feature = "raster")]
pub use backend::raster::RasterSurface;
pub use backend::recording::{RecordingSurface, SurfaceOp};
pub use backend::{LineCap, LineJoin, StrokeStyle, Surface};
pub use color::Rgba;
pub use error::{RenderError, RenderResult};

use inkboard_core::{DrawableObject, StrokeObject};

/// Why an object produced no marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A stroke with fewer than two points.
    TooFewPoints,
    /// An object whose kind this renderer does not draw.
    UnknownKind(Option<String>),
    /// A stroke entry whose fields could not be read.
    Malformed,
    /// A stroke whose color string could not be parsed.
    InvalidColor(String),
    /// The surface refused the stroke.
    SurfaceRejected(String),
}

/// An object the renderer passed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedObject {
    /// Position in the object list.
    pub index: usize,
    /// Object id, if it has one.
    pub id: Option<String>,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Strokes painted.
    pub drawn: usize,
    /// Objects that produced no marks.
    pub skipped: Vec<SkippedObject>,
}

/// The render pipeline. Owns its surface exclusively.
#[derive(Debug)]
pub struct Renderer<S: Surface> {
    surface: S,
    frame_count: u64,
}

impl<S: Surface> Renderer<S> {
    /// Create a renderer drawing onto `surface`.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            frame_count: 0,
        }
    }

    /// Repaint the whole surface from `objects`, in order.
    ///
    /// Never fails: objects that cannot be drawn are skipped and reported
    /// in the returned stats.
    pub fn render(&mut self, objects: &[DrawableObject]) -> RenderStats {
        self.surface.clear();

        let mut stats = RenderStats::default();
        for (index, object) in objects.iter().enumerate() {
            let outcome = match object {
                DrawableObject::Stroke(stroke) => self.draw_stroke(stroke),
                DrawableObject::Opaque(_) => Err(match object.kind() {
                    Some(inkboard_core::STROKE_KIND) => SkipReason::Malformed,
                    kind => SkipReason::UnknownKind(kind.map(str::to_string)),
                }),
            };

            match outcome {
                Ok(()) => stats.drawn += 1,
                Err(reason) => {
                    log_skip(index, object, &reason);
                    stats.skipped.push(SkippedObject {
                        index,
                        id: object.id().map(str::to_string),
                        reason,
                    });
                }
            }
        }

        self.frame_count += 1;
        tracing::trace!(
            frame = self.frame_count,
            drawn = stats.drawn,
            skipped = stats.skipped.len(),
            "Rendered {}x{}",
            self.surface.width(),
            self.surface.height()
        );
        stats
    }

    fn draw_stroke(&mut self, stroke: &StrokeObject) -> Result<(), SkipReason> {
        if !stroke.is_drawable() {
            return Err(SkipReason::TooFewPoints);
        }
        let color =
            Rgba::parse(&stroke.color).map_err(|_| SkipReason::InvalidColor(stroke.color.clone()))?;
        let style = StrokeStyle::round(color, stroke.size);
        self.surface
            .stroke_polyline(&stroke.points, &style)
            .map_err(|e| SkipReason::SurfaceRejected(e.to_string()))
    }

    /// Number of renders performed.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Borrow the surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

fn log_skip(index: usize, object: &DrawableObject, reason: &SkipReason) {
    let id = object.id().unwrap_or("<none>");
    match reason {
        SkipReason::TooFewPoints | SkipReason::UnknownKind(_) => {
            tracing::debug!(index, id, ?reason, "Skipping object");
        }
        SkipReason::Malformed | SkipReason::InvalidColor(_) | SkipReason::SurfaceRejected(_) => {
            tracing::warn!(index, id, ?reason, "Skipping malformed object");
        }
    }
}
