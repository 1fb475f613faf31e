//! A drawing session: one document, one stroke builder, one renderer.

use std::path::Path;

use inkboard_core::{codec, Document, PointerEvent, StrokeBuilder};
use inkboard_renderer::{RenderStats, Renderer, Surface};

use crate::persistence::{read_project_text, write_artifact};
use crate::script::ScriptEvent;
use crate::SessionResult;

/// Wires pointer input, the document and the render pipeline together.
///
/// Every state-changing event triggers a full redraw; nothing renders on a
/// timer.
#[derive(Debug)]
pub struct CanvasSession<S: Surface> {
    document: Document,
    builder: StrokeBuilder,
    renderer: Renderer<S>,
    last_render: RenderStats,
}

impl<S: Surface> CanvasSession<S> {
    /// Start a session with an empty document and draw the first frame.
    pub fn new(surface: S) -> Self {
        Self::with_document(surface, Document::new())
    }

    /// Start a session on an existing document and draw the first frame.
    pub fn with_document(surface: S, document: Document) -> Self {
        let mut session = Self {
            document,
            builder: StrokeBuilder::new(),
            renderer: Renderer::new(surface),
            last_render: RenderStats::default(),
        };
        session.redraw();
        session
    }

    /// The session's document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The render pipeline.
    #[must_use]
    pub fn renderer(&self) -> &Renderer<S> {
        &self.renderer
    }

    /// Stats from the most recent redraw.
    #[must_use]
    pub fn last_render(&self) -> &RenderStats {
        &self.last_render
    }

    /// Feed a pointer event. Returns whether the surface was redrawn.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let changed = self.builder.handle(&mut self.document, event);
        if changed {
            self.redraw();
        }
        changed
    }

    /// Change the brush for future strokes.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is not positive; the brush is unchanged.
    pub fn set_brush(&mut self, color: impl Into<String>, size: f64) -> SessionResult<()> {
        self.document.set_brush(color, size)?;
        Ok(())
    }

    /// Remove every object and redraw.
    pub fn clear(&mut self) {
        self.document.clear();
        self.redraw();
    }

    /// Apply one scripted event. Returns whether the surface was redrawn.
    ///
    /// # Errors
    ///
    /// Returns an error if a brush event carries an invalid size.
    pub fn apply(&mut self, event: &ScriptEvent) -> SessionResult<bool> {
        if let Some(pointer) = event.as_pointer() {
            return Ok(self.handle_pointer(pointer));
        }
        match event {
            ScriptEvent::Brush { color, size } => {
                self.set_brush(color.clone(), *size)?;
                Ok(false)
            }
            ScriptEvent::Clear => {
                self.clear();
                Ok(true)
            }
            ScriptEvent::Press(_) | ScriptEvent::Move(_) | ScriptEvent::Release => Ok(false),
        }
    }

    /// Serialize the document to project JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn save_project(&self) -> SessionResult<String> {
        Ok(codec::save(&self.document)?)
    }

    /// Replace the document with a parsed project and redraw.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is malformed; the document is left
    /// as it was.
    pub fn load_project_text(&mut self, text: &str) -> SessionResult<()> {
        codec::load_into(&mut self.document, text)?;
        self.builder = StrokeBuilder::new();
        self.redraw();
        Ok(())
    }

    /// Read a project file and load it.
    ///
    /// The session is exclusively borrowed until the read completes, so no
    /// drawing can interleave with a pending load.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid project.
    pub async fn load_project_file(&mut self, path: &Path) -> SessionResult<()> {
        let text = read_project_text(path).await?;
        self.load_project_text(&text)?;
        tracing::info!(
            path = %path.display(),
            objects = self.document.len(),
            "Project loaded"
        );
        Ok(())
    }

    /// Save the project to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save_project_file(&self, path: &Path) -> SessionResult<()> {
        let text = self.save_project()?;
        write_artifact(path, text).await
    }

    fn redraw(&mut self) {
        self.last_render = self.renderer.render(self.document.objects());
    }
}
