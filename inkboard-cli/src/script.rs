//! Input scripts.
//!
//! A script is a JSON array standing in for the pointer source and the brush
//! widgets:
//!
//! ```json
//! [
//!   {"type": "brush", "color": "#ff0000", "size": 4},
//!   {"type": "press", "x": 0, "y": 0},
//!   {"type": "move", "x": 10, "y": 0},
//!   {"type": "release"},
//!   {"type": "clear"}
//! ]
//! ```

use inkboard_core::{Point, PointerEvent};
use serde::{Deserialize, Serialize};

use crate::{SessionError, SessionResult};

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScriptEvent {
    /// Pointer pressed.
    Press(Point),
    /// Pointer moved.
    Move(Point),
    /// Pointer released.
    Release,
    /// Brush widgets changed.
    Brush {
        /// New CSS color.
        color: String,
        /// New line width.
        size: f64,
    },
    /// Clear button pressed.
    Clear,
}

impl ScriptEvent {
    /// The pointer event this script event carries, if any.
    #[must_use]
    pub fn as_pointer(&self) -> Option<PointerEvent> {
        match self {
            Self::Press(point) => Some(PointerEvent::Press(*point)),
            Self::Move(point) => Some(PointerEvent::Move(*point)),
            Self::Release => Some(PointerEvent::Release),
            Self::Brush { .. } | Self::Clear => None,
        }
    }
}

/// Parse a script.
///
/// # Errors
///
/// Returns [`SessionError::Script`] if the text is not a JSON array of
/// script events.
pub fn parse_script(text: &str) -> SessionResult<Vec<ScriptEvent>> {
    serde_json::from_str(text).map_err(SessionError::Script)
}
