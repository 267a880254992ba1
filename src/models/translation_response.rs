//! The result of a translation call

use crate::error::CoerceResult;
use crate::model::Model;
use crate::models::alignment::{self, Alignment, AlignmentSection};
use crate::shape::{FieldSchema, ModelSchema, Shape};
use serde::{Deserialize, Serialize};

/// A translated text together with the engine that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub engine: String,
    pub engine_version: String,
    /// Between 0 and 1; only present when the source language was detected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language_confidence: Option<f64>,
    pub from_language: String,
    pub to_language: String,
    pub source_text: String,
    pub translated_text: String,
    /// Only present when alignment was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

static SCHEMA: ModelSchema = ModelSchema {
    name: "TranslationResponse",
    fields: &[
        FieldSchema::required("engine", || Shape::String),
        FieldSchema::required("engine_version", || Shape::String),
        FieldSchema::optional("detected_language_confidence", || Shape::Number),
        FieldSchema::required("from_language", || Shape::String),
        FieldSchema::required("to_language", || Shape::String),
        FieldSchema::required("source_text", || Shape::String),
        FieldSchema::required("translated_text", || Shape::String),
        FieldSchema::optional("alignment", alignment::alignment_shape),
    ],
};

impl TranslationResponse {
    pub fn new(
        engine: impl Into<String>,
        engine_version: impl Into<String>,
        from_language: impl Into<String>,
        to_language: impl Into<String>,
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Self {
        Self {
            engine: engine.into(),
            engine_version: engine_version.into(),
            detected_language_confidence: None,
            from_language: from_language.into(),
            to_language: to_language.into(),
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            alignment: None,
        }
    }

    pub fn with_detected_language_confidence(mut self, confidence: f64) -> Self {
        self.detected_language_confidence = Some(confidence);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Engine name and version as the service reports them, e.g. `microsoft (3.0)`
    pub fn engine_label(&self) -> String {
        format!("{} ({})", self.engine, self.engine_version)
    }

    /// Typed view of the alignment; empty when no alignment was returned
    pub fn alignment_sections(&self) -> CoerceResult<Vec<AlignmentSection>> {
        match &self.alignment {
            Some(entries) => alignment::parse_sections(entries),
            None => Ok(Vec::new()),
        }
    }
}

impl Model for TranslationResponse {
    fn schema() -> &'static ModelSchema {
        &SCHEMA
    }
}
