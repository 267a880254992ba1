//! A single request validation failure reported by the service

use crate::model::Model;
use crate::shape::{FieldSchema, ModelSchema, Shape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the location of an invalid input, e.g. `body` or `0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationSegment {
    Index(i64),
    Name(String),
}

impl fmt::Display for LocationSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSegment::Index(i) => write!(f, "{}", i),
            LocationSegment::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for LocationSegment {
    fn from(name: &str) -> Self {
        LocationSegment::Name(name.to_string())
    }
}

impl From<i64> for LocationSegment {
    fn from(index: i64) -> Self {
        LocationSegment::Index(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub loc: Vec<LocationSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

static SCHEMA: ModelSchema = ModelSchema {
    name: "ValidationError",
    fields: &[
        FieldSchema::required("loc", || {
            Shape::array_of(Shape::OneOf(vec![Shape::String, Shape::Integer]))
        }),
        FieldSchema::required("msg", || Shape::String),
        FieldSchema::required("type", || Shape::String),
    ],
};

impl ValidationError {
    pub fn new(loc: Vec<LocationSegment>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// Dotted location, e.g. `body.to_language`
    pub fn location(&self) -> String {
        self.loc
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.msg)
    }
}

impl Model for ValidationError {
    fn schema() -> &'static ModelSchema {
        &SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_construct_mixed_location() {
        let raw = json!({"loc": ["body", 0, "to_language"], "msg": "too long", "type": "value_error"});
        let error = ValidationError::construct_from_object(&raw).unwrap();
        assert_eq!(
            error.loc,
            vec!["body".into(), LocationSegment::Index(0), "to_language".into()]
        );
        assert_eq!(error.kind, "value_error");
        assert_eq!(error.location(), "body.0.to_language");
        assert_eq!(error.to_string(), "body.0.to_language: too long");
    }

    #[test]
    fn test_construct_rejects_boolean_location() {
        let raw = json!({"loc": ["body", true], "msg": "m", "type": "t"});
        let err = ValidationError::construct_from_object(&raw).unwrap_err();
        assert_eq!(err.path.to_string(), "loc[1]");
        assert_eq!(err.expected, "string | integer");
    }

    #[test]
    fn test_construct_rejects_out_of_range_index() {
        let raw = json!({"loc": ["body", u64::MAX], "msg": "m", "type": "t"});
        let err = ValidationError::construct_from_object(&raw).unwrap_err();
        assert_eq!(err.path.to_string(), "loc[1]");
        assert_eq!(err.expected, "string | integer");
    }

    #[test]
    fn test_type_field_wire_name() {
        let error = ValidationError::new(vec!["query".into()], "field required", "value_error.missing");
        let value = error.to_value().unwrap();
        assert_eq!(value["type"], json!("value_error.missing"));
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_missing_msg() {
        let raw = json!({"loc": [], "type": "t"});
        let err = ValidationError::construct_from_object(&raw).unwrap_err();
        assert_eq!(err.path.to_string(), "msg");
    }
}
