//! Error types for document and codec operations.

use thiserror::Error;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// A caller-supplied value was rejected (for example a non-positive brush size).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The project payload is not well-formed JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The project payload is well-formed but lacks a valid `objects` sequence.
    #[error("Schema error: {0}")]
    Schema(String),

    /// The document could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}
