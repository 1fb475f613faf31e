//! Pointer input and the stroke-capture state machine.

use serde::{Deserialize, Serialize};

use crate::{Document, Point};

/// A raw pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Pointer pressed (pen down).
    Press(Point),
    /// Pointer moved.
    Move(Point),
    /// Pointer released (pen up).
    Release,
}

/// Capture state of a [`StrokeBuilder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureState {
    /// No pointer is down.
    #[default]
    Idle,
    /// A press was seen and no release yet.
    Capturing,
}

/// Turns a press / move / release stream into document edits.
///
/// The builder only tracks whether a gesture is in progress; the stroke
/// itself lives in the [`Document`]. Moves and releases that arrive without
/// a matching press are dropped.
#[derive(Debug, Clone, Default)]
pub struct StrokeBuilder {
    state: CaptureState,
}

impl StrokeBuilder {
    /// Create an idle builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current capture state.
    #[must_use]
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    /// Feed one pointer event.
    ///
    /// Returns `true` when the event caused a transition and the surface
    /// should be redrawn, `false` when it was ignored. Presses and moves at
    /// non-finite positions are ignored.
    pub fn handle(&mut self, document: &mut Document, event: PointerEvent) -> bool {
        if let PointerEvent::Press(point) | PointerEvent::Move(point) = event {
            if !point.is_finite() {
                tracing::debug!(?event, "Ignoring pointer event at a non-finite position");
                return false;
            }
        }

        match (self.state, event) {
            (CaptureState::Idle, PointerEvent::Press(point)) => {
                if document.begin_stroke(point).is_err() {
                    return false;
                }
                self.state = CaptureState::Capturing;
                true
            }
            (CaptureState::Capturing, PointerEvent::Press(point)) => {
                tracing::debug!("Press while capturing, starting a new stroke");
                document.end_stroke();
                document.begin_stroke(point).is_ok()
            }
            (CaptureState::Capturing, PointerEvent::Move(point)) => {
                document.extend_active_stroke(point);
                true
            }
            (CaptureState::Capturing, PointerEvent::Release) => {
                document.end_stroke();
                self.state = CaptureState::Idle;
                true
            }
            (CaptureState::Idle, PointerEvent::Move(_) | PointerEvent::Release) => {
                tracing::trace!(?event, "Ignoring pointer event without a press");
                false
            }
        }
    }

    /// Shorthand for [`PointerEvent::Press`].
    pub fn press(&mut self, document: &mut Document, point: Point) -> bool {
        self.handle(document, PointerEvent::Press(point))
    }

    /// Shorthand for [`PointerEvent::Move`].
    pub fn move_to(&mut self, document: &mut Document, point: Point) -> bool {
        self.handle(document, PointerEvent::Move(point))
    }

    /// Shorthand for [`PointerEvent::Release`].
    pub fn release(&mut self, document: &mut Document) -> bool {
        self.handle(document, PointerEvent::Release)
    }
}
