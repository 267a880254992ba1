//! Models and shape-checked JSON coercion for the multi-translate API
//!
//! Every model in this crate is a plain value record with a static field table
//! ([`ModelSchema`]). Raw JSON handed back by the HTTP layer is walked against a
//! declared [`Shape`] and either produces a normalized value or fails with a
//! [`ShapeMismatch`] naming the offending field path.
//!
//! # Example
//!
//! ```ignore
//! use multi_translate::{Model, TranslationResponse};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "engine": "google",
//!     "engine_version": "3",
//!     "from_language": "en",
//!     "to_language": "fr",
//!     "source_text": "hello",
//!     "translated_text": "bonjour"
//! });
//! let response = TranslationResponse::construct_from_object(&raw)?;
//! assert_eq!(response.translated_text, "bonjour");
//! ```

pub mod coerce;
pub mod error;
pub mod model;
pub mod models;
pub mod path;
pub mod shape;

pub use coerce::{Coercion, coerce, coerce_with, decode};
pub use error::{CoerceResult, ShapeMismatch, ValueKind};
pub use model::Model;
pub use models::{
    Alignment, AlignmentEntry, AlignmentSection, Engine, HttpValidationError, LocationSegment, TextSpan,
    TranslationRequest, TranslationResponse, ValidationError,
};
pub use path::{FieldPath, PathSegment};
pub use shape::{FieldSchema, ModelSchema, Presence, Shape};
