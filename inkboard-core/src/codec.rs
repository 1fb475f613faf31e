//! Project file serialization.
//!
//! A project file is a JSON object with a `brush` and an ordered `objects`
//! array. The drawing status is session-local and never written.
//!
//! Loading has a single validation gate: the top-level value must be an
//! object carrying an `objects` array. Individual entries are accepted as
//! they are (see [`DrawableObject::from_value`]).

use serde::Serialize;
use serde_json::Value;

use crate::{BrushSettings, CanvasError, CanvasResult, Document, DrawableObject};

/// File name suggested when saving a project.
pub const DEFAULT_PROJECT_FILE_NAME: &str = "digital-canvas-project.json";

#[derive(Serialize)]
struct ProjectRecord<'a> {
    brush: &'a BrushSettings,
    objects: &'a [DrawableObject],
}

/// Serialize a document's brush and objects to pretty-printed JSON.
///
/// # Errors
///
/// Returns [`CanvasError::Serialization`] if serialization fails.
pub fn save(document: &Document) -> CanvasResult<String> {
    let record = ProjectRecord {
        brush: document.brush(),
        objects: document.objects(),
    };
    serde_json::to_string_pretty(&record).map_err(CanvasError::Serialization)
}

/// Parse a project payload into a new document.
///
/// `fallback_brush` is used when the payload has no usable brush; callers
/// pass their current brush so a load never leaves the brush undefined. The
/// returned document has no stroke in progress. Nothing is mutated on
/// failure, so callers can apply the result with [`Document::restore`].
///
/// # Errors
///
/// Returns [`CanvasError::Parse`] if `text` is not well-formed JSON and
/// [`CanvasError::Schema`] if it has no `objects` array.
pub fn load(text: &str, fallback_brush: &BrushSettings) -> CanvasResult<Document> {
    let root: Value = serde_json::from_str(text).map_err(CanvasError::Parse)?;

    let Value::Object(mut fields) = root else {
        return Err(CanvasError::Schema(
            "project must be a JSON object".to_string(),
        ));
    };

    let objects = match fields.remove("objects") {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .map(DrawableObject::from_value)
            .collect::<Vec<_>>(),
        Some(_) => {
            return Err(CanvasError::Schema(
                "`objects` must be an array".to_string(),
            ))
        }
        None => return Err(CanvasError::Schema("missing `objects` array".to_string())),
    };

    let brush = fields
        .remove("brush")
        .and_then(parse_brush)
        .unwrap_or_else(|| fallback_brush.clone());

    tracing::debug!(objects = objects.len(), "Project parsed");
    Ok(Document::from_parts(brush, objects))
}

/// Parse and apply a payload to `document` in one step.
///
/// # Errors
///
/// Same as [`load`]; the document is left untouched on error.
pub fn load_into(document: &mut Document, text: &str) -> CanvasResult<()> {
    match load(text, document.brush()) {
        Ok(loaded) => {
            document.restore(loaded);
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Rejected project payload: {e}");
            Err(e)
        }
    }
}

fn parse_brush(value: Value) -> Option<BrushSettings> {
    match serde_json::from_value::<BrushSettings>(value) {
        Ok(brush) if brush.is_valid() => Some(brush),
        Ok(brush) => {
            tracing::debug!(size = brush.size, "Ignoring project brush with invalid size");
            None
        }
        Err(e) => {
            tracing::debug!("Ignoring malformed project brush: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, StrokeBuilder};
    use serde_json::json;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        let mut builder = StrokeBuilder::new();
        doc.set_brush("#ff0000", 4.0).expect("valid brush");
        builder.press(&mut doc, Point::new(0.0, 0.0));
        builder.move_to(&mut doc, Point::new(10.5, 0.25));
        builder.release(&mut doc);
        doc.set_brush("rgb(0, 0, 255)", 12.0).expect("valid brush");
        builder.press(&mut doc, Point::new(3.0, 3.0));
        doc
    }

    #[test]
    fn test_round_trip() {
        let doc = sample_document();
        let text = save(&doc).expect("save");
        let loaded = load(&text, &BrushSettings::default()).expect("load");

        assert_eq!(loaded.brush(), doc.brush());
        assert_eq!(loaded.objects(), doc.objects());
        assert!(!loaded.drawing_status().is_active);
    }

    #[test]
    fn test_coordinates_survive_load_save_exactly() {
        let objects = json!([{
            "id": "precise",
            "kind": "stroke",
            "color": "#000",
            "size": 0.1,
            "points": [{"x": 123.456_789_012, "y": 1e39}, {"x": -0.000_001, "y": 7.25}]
        }]);
        let text = json!({"brush": {"color": "#000", "size": 2.5}, "objects": objects}).to_string();

        let saved = save(&load(&text, &BrushSettings::default()).expect("load")).expect("save");
        let value: Value = serde_json::from_str(&saved).expect("json");
        assert_eq!(value["objects"], objects);

        let reloaded = load(&saved, &BrushSettings::default()).expect("reload");
        assert!(reloaded.objects()[0].as_stroke().is_some());
    }

    #[test]
    fn test_save_omits_drawing_status() {
        let doc = sample_document();
        assert!(doc.drawing_status().is_active);

        let value: Value = serde_json::from_str(&save(&doc).expect("save")).expect("json");
        let keys: Vec<_> = value.as_object().expect("object").keys().cloned().collect();
        assert_eq!(keys, vec!["brush".to_string(), "objects".to_string()]);
    }

    #[test]
    fn test_parse_error() {
        let err = load("{not json", &BrushSettings::default()).unwrap_err();
        assert!(matches!(err, CanvasError::Parse(_)));
    }

    #[test]
    fn test_schema_errors() {
        for text in [r#"{"foo": 1}"#, r#"{"objects": {}}"#, "[1, 2]", "null"] {
            let err = load(text, &BrushSettings::default()).unwrap_err();
            assert!(matches!(err, CanvasError::Schema(_)), "{text}: {err}");
        }
    }

    #[test]
    fn test_failed_load_leaves_document_untouched() {
        let mut doc = sample_document();
        let before = doc.objects().to_vec();

        assert!(load_into(&mut doc, r#"{"foo": 1}"#).is_err());
        assert_eq!(doc.objects(), before.as_slice());
        assert!(doc.drawing_status().is_active);
    }

    #[test]
    fn test_brush_fallback() {
        let fallback = BrushSettings::new("#abcdef", 7.0).expect("valid brush");

        let missing = load(r#"{"objects": []}"#, &fallback).expect("load");
        assert_eq!(missing.brush(), &fallback);

        let mistyped = load(r#"{"brush": "red", "objects": []}"#, &fallback).expect("load");
        assert_eq!(mistyped.brush(), &fallback);

        let zero = load(
            r##"{"brush": {"color": "#000", "size": 0}, "objects": []}"##,
            &fallback,
        )
        .expect("load");
        assert_eq!(zero.brush(), &fallback);

        let present = load(
            r##"{"brush": {"color": "#111", "size": 2}, "objects": []}"##,
            &fallback,
        )
        .expect("load");
        assert_eq!(present.brush().color, "#111");
    }

    #[test]
    fn test_payload_drawing_state_is_ignored() {
        let text = json!({
            "objects": [],
            "drawing": {"isDrawing": true, "activeStrokeId": "x"},
            "drawingStatus": {"isActive": true, "activeObjectId": "x"}
        })
        .to_string();
        let loaded = load(&text, &BrushSettings::default()).expect("load");
        assert!(!loaded.drawing_status().is_active);
        assert!(loaded.drawing_status().active_object_id.is_none());
    }

    #[test]
    fn test_unknown_kind_round_trips() {
        let future = json!({"id": "f1", "kind": "unknown-future-type", "radius": 3});
        let text = json!({"objects": [future.clone()], "version": 2}).to_string();

        let loaded = load(&text, &BrushSettings::default()).expect("load");
        let resaved: Value = serde_json::from_str(&save(&loaded).expect("save")).expect("json");
        assert_eq!(resaved["objects"], json!([future]));
        assert!(resaved.get("version").is_none());
    }
}
