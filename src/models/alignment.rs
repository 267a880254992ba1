//! Word alignment between source and translated text
//!
//! On the wire an alignment is a list of entries, each mapping a side name
//! (`src`, `dest`) to a span description whose values are all strings:
//!
//! ```json
//! [{"src": {"start": "0", "end": "4", "text": "hello"},
//!   "dest": {"start": "0", "end": "4", "text": "안녕하세요"}}]
//! ```

use crate::coerce::{Coercion, decode};
use crate::error::CoerceResult;
use crate::model::Model;
use crate::path::FieldPath;
use crate::shape::{FieldSchema, ModelSchema, Shape};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One alignment entry as carried on the wire
pub type AlignmentEntry = BTreeMap<String, BTreeMap<String, String>>;

/// Full alignment payload of a response
pub type Alignment = Vec<AlignmentEntry>;

/// Wire shape of [`Alignment`]
pub fn alignment_shape() -> Shape {
    Shape::array_of(Shape::map_of(Shape::map_of(Shape::String)))
}

/// Character range of one side of an alignment entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    /// Inclusive end offset
    pub end: usize,
    pub text: String,
}

static TEXT_SPAN_SCHEMA: ModelSchema = ModelSchema {
    name: "TextSpan",
    fields: &[
        FieldSchema::required("start", || Shape::Unsigned),
        FieldSchema::required("end", || Shape::Unsigned),
        FieldSchema::required("text", || Shape::String),
    ],
};

impl Model for TextSpan {
    fn schema() -> &'static ModelSchema {
        &TEXT_SPAN_SCHEMA
    }
}

/// A source span paired with the translated span it corresponds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentSection {
    pub src: TextSpan,
    pub dest: TextSpan,
}

static ALIGNMENT_SECTION_SCHEMA: ModelSchema = ModelSchema {
    name: "AlignmentSection",
    fields: &[
        FieldSchema::required("src", || Shape::Model(&TEXT_SPAN_SCHEMA)),
        FieldSchema::required("dest", || Shape::Model(&TEXT_SPAN_SCHEMA)),
    ],
};

impl Model for AlignmentSection {
    fn schema() -> &'static ModelSchema {
        &ALIGNMENT_SECTION_SCHEMA
    }
}

/// Parse wire alignment entries into typed sections
///
/// Offsets are carried as strings, so this reads them leniently. Errors are
/// reported under the `alignment` field.
pub fn parse_sections(alignment: &[AlignmentEntry]) -> CoerceResult<Vec<AlignmentSection>> {
    let raw = Value::Array(alignment.iter().map(entry_value).collect());
    decode(
        &raw,
        &Shape::array_of(AlignmentSection::shape()),
        Coercion::Lenient,
    )
    .map_err(|e| e.under(&FieldPath::root().key("alignment")))
}

fn entry_value(entry: &AlignmentEntry) -> Value {
    let side = |span: &BTreeMap<String, String>| {
        Value::Object(
            span.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<Map<_, _>>(),
        )
    };
    Value::Object(entry.iter().map(|(k, v)| (k.clone(), side(v))).collect::<Map<_, _>>())
}
