//! The document: ground-truth drawing state for a session.

use crate::{BrushSettings, CanvasError, CanvasResult, DrawableObject, ObjectId, Point, StrokeObject};

/// Bookkeeping for the stroke currently being drawn. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawingStatus {
    /// Whether a stroke is being appended to.
    pub is_active: bool,
    /// The stroke being appended to, if any.
    pub active_object_id: Option<ObjectId>,
}

impl DrawingStatus {
    /// No stroke in progress.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    fn active(id: ObjectId) -> Self {
        Self {
            is_active: true,
            active_object_id: Some(id),
        }
    }
}

/// Brush settings, the ordered object list and the drawing status.
///
/// The object list is paint order: later objects are drawn over earlier
/// ones. Objects are only ever appended, cleared wholesale or replaced
/// wholesale, so insertion order is preserved.
#[derive(Debug, Clone, Default)]
pub struct Document {
    brush: BrushSettings,
    objects: Vec<DrawableObject>,
    drawing: DrawingStatus,
}

impl Document {
    /// Create an empty document with the default brush.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document holding `objects`, with no stroke in progress.
    #[must_use]
    pub fn from_parts(brush: BrushSettings, objects: Vec<DrawableObject>) -> Self {
        Self {
            brush,
            objects,
            drawing: DrawingStatus::idle(),
        }
    }

    /// Current brush settings.
    #[must_use]
    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    /// All objects in paint order.
    #[must_use]
    pub fn objects(&self) -> &[DrawableObject] {
        &self.objects
    }

    /// Current drawing status.
    #[must_use]
    pub fn drawing_status(&self) -> &DrawingStatus {
        &self.drawing
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the document has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Update the brush used for strokes started from now on.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::Validation`] if `size` is not positive.
    /// The brush is left unchanged in that case.
    pub fn set_brush(&mut self, color: impl Into<String>, size: f64) -> CanvasResult<()> {
        self.brush = BrushSettings::new(color, size)?;
        tracing::debug!(color = %self.brush.color, size, "Brush updated");
        Ok(())
    }

    /// Start a new stroke at `start` using the current brush.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::Validation`] if `start` is not finite.
    /// Nothing is added in that case.
    pub fn begin_stroke(&mut self, start: Point) -> CanvasResult<ObjectId> {
        if !start.is_finite() {
            return Err(CanvasError::Validation(format!(
                "stroke cannot start at non-finite point ({}, {})",
                start.x, start.y
            )));
        }
        let id = ObjectId::new();
        let stroke = StrokeObject::new(id.clone(), self.brush.color.clone(), self.brush.size, start);
        self.objects.push(stroke.into());
        self.drawing = DrawingStatus::active(id.clone());
        tracing::debug!(%id, x = start.x, y = start.y, "Stroke started");
        Ok(id)
    }

    /// Append `point` to the active stroke.
    ///
    /// Does nothing when no stroke is active, the active stroke no longer
    /// exists, or `point` is not finite. Returns whether a point was appended.
    pub fn extend_active_stroke(&mut self, point: Point) -> bool {
        if !point.is_finite() {
            tracing::debug!(x = point.x, y = point.y, "Dropping non-finite point");
            return false;
        }
        match self.active_stroke_mut() {
            Some(stroke) => {
                stroke.push_point(point);
                true
            }
            None => false,
        }
    }

    /// Finish the active stroke, if any.
    pub fn end_stroke(&mut self) {
        if let Some(id) = self.drawing.active_object_id.take() {
            tracing::debug!(%id, "Stroke ended");
        }
        self.drawing = DrawingStatus::idle();
    }

    /// The stroke currently being appended to.
    #[must_use]
    pub fn active_stroke(&self) -> Option<&StrokeObject> {
        let id = self.active_id()?;
        self.objects
            .iter()
            .rev()
            .filter_map(DrawableObject::as_stroke)
            .find(|stroke| &stroke.id == id)
    }

    /// Remove every object. The brush is kept.
    pub fn clear(&mut self) {
        tracing::debug!(removed = self.objects.len(), "Document cleared");
        self.objects.clear();
        self.drawing = DrawingStatus::idle();
    }

    /// Replace the object list wholesale, abandoning any stroke in progress.
    pub fn replace_objects(&mut self, objects: Vec<DrawableObject>) {
        self.objects = objects;
        self.drawing = DrawingStatus::idle();
    }

    /// Adopt the brush and objects of a freshly loaded document.
    pub fn restore(&mut self, loaded: Document) {
        self.brush = loaded.brush;
        self.replace_objects(loaded.objects);
        tracing::debug!(objects = self.objects.len(), "Document restored");
    }

    fn active_id(&self) -> Option<&ObjectId> {
        if self.drawing.is_active {
            self.drawing.active_object_id.as_ref()
        } else {
            None
        }
    }

    fn active_stroke_mut(&mut self) -> Option<&mut StrokeObject> {
        let id = self.active_id()?.clone();
        self.objects
            .iter_mut()
            .rev()
            .filter_map(DrawableObject::as_stroke_mut)
            .find(|stroke| stroke.id == id)
    }
}
