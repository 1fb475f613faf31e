//! Drawable objects - the building blocks of a document.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::brush::validate_size;

/// Discriminant value written for stroke objects.
pub const STROKE_KIND: &str = "stroke";

/// Unique identifier for an object.
///
/// Fresh ids are random v4 UUIDs, so an id is never handed out twice even
/// after the object carrying it is cleared. Ids read from a project file are
/// kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Create a new unique object ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A surface-local position in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position (pixels from left).
    pub x: f64,
    /// Y position (pixels from top).
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A single pen gesture: ordered points drawn with a fixed color and width.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StrokeObject {
    /// Unique identifier.
    pub id: ObjectId,
    /// CSS color captured from the brush when the stroke began.
    pub color: String,
    /// Line width captured from the brush when the stroke began.
    pub size: f64,
    /// Points in drawing order.
    pub points: Vec<Point>,
    /// Fields this version does not understand, re-emitted on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StrokeObject {
    /// Start a stroke at `start`.
    #[must_use]
    pub fn new(id: ObjectId, color: impl Into<String>, size: f64, start: Point) -> Self {
        Self {
            id,
            color: color.into(),
            size,
            points: vec![start],
            extra: Map::new(),
        }
    }

    /// Append a point to the end of the stroke.
    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Whether the stroke leaves a visible mark (two or more points).
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Parse a stroke out of a raw project entry.
    fn from_record(value: &Value) -> Result<Self, String> {
        let Value::Object(fields) = value else {
            return Err("stroke entry is not an object".to_string());
        };

        let mut fields = fields.clone();
        if fields.remove("kind").is_none() {
            fields.remove("type");
        }

        let stroke: Self =
            serde_json::from_value(Value::Object(fields)).map_err(|e| e.to_string())?;
        validate_size(stroke.size).map_err(|e| e.to_string())?;
        Ok(stroke)
    }
}

/// Anything that can live in a document's object list.
///
/// Only strokes are understood. Every other entry, including strokes whose
/// fields do not parse, is carried as [`DrawableObject::Opaque`] so that it
/// survives a load/save cycle untouched and is skipped by renderers.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawableObject {
    /// A freehand pen stroke.
    Stroke(StrokeObject),
    /// An entry of unknown kind or a malformed stroke, kept verbatim.
    Opaque(Value),
}

impl DrawableObject {
    /// Build an object from a raw project entry. Never fails.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if discriminant(&value) != Some(STROKE_KIND) {
            return Self::Opaque(value);
        }

        match StrokeObject::from_record(&value) {
            Ok(stroke) => Self::Stroke(stroke),
            Err(reason) => {
                tracing::warn!(%reason, "Keeping malformed stroke as opaque object");
                Self::Opaque(value)
            }
        }
    }

    /// The `kind` discriminant, if the object has one.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Stroke(_) => Some(STROKE_KIND),
            Self::Opaque(value) => discriminant(value),
        }
    }

    /// The object's id, if it has a string one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Stroke(stroke) => Some(stroke.id.as_str()),
            Self::Opaque(value) => value.get("id").and_then(Value::as_str),
        }
    }

    /// Borrow as a stroke.
    #[must_use]
    pub fn as_stroke(&self) -> Option<&StrokeObject> {
        match self {
            Self::Stroke(stroke) => Some(stroke),
            Self::Opaque(_) => None,
        }
    }

    /// Mutably borrow as a stroke.
    pub fn as_stroke_mut(&mut self) -> Option<&mut StrokeObject> {
        match self {
            Self::Stroke(stroke) => Some(stroke),
            Self::Opaque(_) => None,
        }
    }
}

impl From<StrokeObject> for DrawableObject {
    fn from(stroke: StrokeObject) -> Self {
        Self::Stroke(stroke)
    }
}

/// Read the `kind` discriminant, falling back to the legacy `type` key.
fn discriminant(value: &Value) -> Option<&str> {
    value
        .get("kind")
        .or_else(|| value.get("type"))
        .and_then(Value::as_str)
}

#[derive(Serialize)]
struct StrokeRecord<'a> {
    id: &'a ObjectId,
    kind: &'static str,
    color: &'a str,
    size: f64,
    points: &'a [Point],
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

impl Serialize for DrawableObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Stroke(stroke) => StrokeRecord {
                id: &stroke.id,
                kind: STROKE_KIND,
                color: &stroke.color,
                size: stroke.size,
                points: &stroke.points,
                extra: &stroke.extra,
            }
            .serialize(serializer),
            Self::Opaque(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for DrawableObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}
