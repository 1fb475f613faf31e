//! Host error types.

use std::path::PathBuf;

use inkboard_core::CanvasError;
use inkboard_renderer::RenderError;
use thiserror::Error;

/// Result type for session and command operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by the host.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A document or codec operation failed.
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    /// Rendering or export failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input script could not be parsed.
    #[error("Invalid input script: {0}")]
    Script(#[source] serde_json::Error),

    /// A configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
