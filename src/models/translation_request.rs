//! The body of a translation call

use crate::model::Model;
use crate::models::engine::Engine;
use crate::shape::{FieldSchema, ModelSchema, Shape};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request to translate `source_text` into `to_language`
///
/// Language codes are ISO-639-1. Leaving `from_language` unset asks the service
/// to detect the source language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// The text to be translated
    pub source_text: String,
    /// The ISO-639-1 code of the language to translate the text to
    pub to_language: String,
    /// The ISO-639-1 code of the language to translate the text from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_language: Option<String>,
    /// Which translation engine to use
    #[serde(default)]
    pub preferred_engine: Engine,
    /// Whether to return word alignment information
    #[serde(default)]
    pub with_alignment: bool,
    /// Whether to fall back to the best available engine if the preferred one fails
    #[serde(default)]
    pub fallback: bool,
}

static SCHEMA: ModelSchema = ModelSchema {
    name: "TranslationRequest",
    fields: &[
        FieldSchema::required("source_text", || Shape::String),
        FieldSchema::required("to_language", || Shape::String),
        FieldSchema::optional("from_language", || Shape::String),
        FieldSchema::defaulted(
            "preferred_engine",
            || Shape::Enum(Engine::NAMES),
            || Value::String(Engine::Best.as_str().to_string()),
        ),
        FieldSchema::defaulted("with_alignment", || Shape::Boolean, || Value::Bool(false)),
        FieldSchema::defaulted("fallback", || Shape::Boolean, || Value::Bool(false)),
    ],
};

impl TranslationRequest {
    /// Create a request with the required fields; everything else takes its default
    pub fn new(source_text: impl Into<String>, to_language: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            to_language: to_language.into(),
            from_language: None,
            preferred_engine: Engine::Best,
            with_alignment: false,
            fallback: false,
        }
    }

    pub fn with_from_language(mut self, from_language: impl Into<String>) -> Self {
        self.from_language = Some(from_language.into());
        self
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.preferred_engine = engine;
        self
    }

    pub fn with_alignment(mut self, with_alignment: bool) -> Self {
        self.with_alignment = with_alignment;
        self
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// True when the service is expected to detect the source language
    pub fn needs_detection(&self) -> bool {
        self.from_language.is_none()
    }
}

impl Model for TranslationRequest {
    fn schema() -> &'static ModelSchema {
        &SCHEMA
    }
}
