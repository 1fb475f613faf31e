//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The surface could not be created (e.g. zero width or height).
    #[error("Surface error: {0}")]
    Surface(String),

    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A stroke could not be drawn on the surface.
    #[error("Stroke failed: {0}")]
    Stroke(String),

    /// Encoding the rendered output failed.
    #[error("Export failed: {0}")]
    Export(String),
}
