//! Brush settings read when a stroke begins.

use serde::{Deserialize, Serialize};

use crate::{CanvasError, CanvasResult};

/// Default brush color.
pub const DEFAULT_BRUSH_COLOR: &str = "#000000";

/// Default brush size in pixels.
pub const DEFAULT_BRUSH_SIZE: f64 = 5.0;

/// Color and width applied to newly started strokes.
///
/// Changing the brush never touches strokes that already exist: each stroke
/// copies these values when it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    /// CSS color string (e.g. `#ff0000`).
    pub color: String,
    /// Line width in pixels. Always positive.
    pub size: f64,
}

impl BrushSettings {
    /// Create validated brush settings.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Validation`] if `size` is not a positive finite number.
    pub fn new(color: impl Into<String>, size: f64) -> CanvasResult<Self> {
        validate_size(size)?;
        Ok(Self {
            color: color.into(),
            size,
        })
    }

    /// Whether these settings satisfy the brush invariants.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        validate_size(self.size).is_ok()
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: DEFAULT_BRUSH_COLOR.to_string(),
            size: DEFAULT_BRUSH_SIZE,
        }
    }
}

/// Reject sizes that are zero, negative, NaN or infinite.
pub(crate) fn validate_size(size: f64) -> CanvasResult<()> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(CanvasError::Validation(format!(
            "brush size must be a positive number, got {size}"
        )))
    }
}
