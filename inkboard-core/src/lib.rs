//! # Inkboard Core
//!
//! Retained-mode drawing state: pen input is stored as a document of
//! drawable objects rather than as pixels.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                inkboard-core                │
//! ├─────────────────────────────────────────────┤
//! │  Stroke Builder  │  Document                │
//! │  - press/move/   │  - Brush settings        │
//! │    release       │  - Objects (paint order) │
//! │  - Idle/Capture  │  - Drawing status        │
//! ├─────────────────────────────────────────────┤
//! │  Project Codec                              │
//! │  - JSON save/load, schema gate              │
//! │  - Unknown kinds round-trip verbatim        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Rendering lives in `inkboard-renderer`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod brush;
pub mod builder;
pub mod codec;
pub mod document;
pub mod error;
pub mod object;

pub use brush::BrushSettings;
pub use builder::{CaptureState, PointerEvent, StrokeBuilder};
pub use document::{Document, DrawingStatus};
pub use error::{CanvasError, CanvasResult};
pub use object::{DrawableObject, ObjectId, Point, StrokeObject, STROKE_KIND};

/// Inkboard core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
