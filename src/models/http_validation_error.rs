//! Body of a 422 response

use crate::model::Model;
use crate::models::validation_error::ValidationError;
use crate::shape::{FieldSchema, ModelSchema, Shape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire name is `HTTPValidationError`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpValidationError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<ValidationError>>,
}

static SCHEMA: ModelSchema = ModelSchema {
    name: "HTTPValidationError",
    fields: &[FieldSchema::optional("detail", || {
        Shape::array_of(ValidationError::shape())
    })],
};

impl HttpValidationError {
    pub fn new(detail: Vec<ValidationError>) -> Self {
        Self {
            detail: Some(detail),
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        self.detail.as_deref().unwrap_or_default()
    }

    /// One `location: message` line per error
    pub fn messages(&self) -> Vec<String> {
        self.errors().iter().map(|e| e.to_string()).collect()
    }
}

impl fmt::Display for HttpValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors().is_empty() {
            return write!(f, "validation failed");
        }
        write!(f, "{}", self.messages().join("; "))
    }
}

impl Model for HttpValidationError {
    fn schema() -> &'static ModelSchema {
        &SCHEMA
    }
}
