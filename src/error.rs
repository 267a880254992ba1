//! Error type for shape coercion

use crate::path::FieldPath;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Runtime kind of a decoded JSON value
///
/// `Absent` stands for a key the raw object does not possess at all, which is
/// distinct from a key present with a `null` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Absent,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Absent => "absent",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw value did not fit the shape declared for it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shape mismatch at {path}: expected {expected}, found {actual}")]
pub struct ShapeMismatch {
    /// Where in the document the value sits
    pub path: FieldPath,
    /// Rendered declared shape
    pub expected: String,
    /// What was actually found there
    pub actual: ValueKind,
}

impl ShapeMismatch {
    pub fn new(path: FieldPath, expected: impl Into<String>, actual: ValueKind) -> Self {
        Self {
            path,
            expected: expected.into(),
            actual,
        }
    }

    /// Mismatch for a required field the raw object does not possess
    pub fn missing(path: FieldPath, expected: impl Into<String>) -> Self {
        Self::new(path, expected, ValueKind::Absent)
    }

    pub fn is_missing(&self) -> bool {
        self.actual == ValueKind::Absent
    }

    /// Re-anchor a mismatch found inside a nested document under `prefix`
    pub fn under(mut self, prefix: &FieldPath) -> Self {
        self.path = prefix.join(&self.path);
        self
    }
}

/// Result type for coercion
pub type CoerceResult<T> = Result<T, ShapeMismatch>;
