//! Project file persistence.
//!
//! Reads are async: a session awaits the whole file before the document is
//! touched.

use std::path::{Path, PathBuf};

use inkboard_core::codec::DEFAULT_PROJECT_FILE_NAME;

use crate::{SessionError, SessionResult};

/// Read a whole text file.
///
/// # Errors
///
/// Returns [`SessionError::Read`] if the file cannot be read as UTF-8.
pub async fn read_project_text(path: &Path) -> SessionResult<String> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SessionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Read project file");
    Ok(text)
}

/// Write bytes to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`SessionError::Write`] if the file cannot be written.
pub async fn write_artifact(path: &Path, bytes: impl AsRef<[u8]>) -> SessionResult<()> {
    let bytes = bytes.as_ref();
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| SessionError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

/// Where a project is saved when no path is given.
#[must_use]
pub fn default_project_path(dir: &Path) -> PathBuf {
    dir.join(DEFAULT_PROJECT_FILE_NAME)
}
