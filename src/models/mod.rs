//! Data-transfer objects of the multi-translate API
//!
//! Field names match the wire exactly (snake_case). Optional fields are
//! `Option`s and are left out of the serialized form when unset; fields with a
//! documented default always carry a value.

pub mod alignment;
pub mod engine;
pub mod http_validation_error;
pub mod translation_request;
pub mod translation_response;
pub mod validation_error;

pub use alignment::{Alignment, AlignmentEntry, AlignmentSection, TextSpan};
pub use engine::Engine;
pub use http_validation_error::HttpValidationError;
pub use translation_request::TranslationRequest;
pub use translation_response::TranslationResponse;
pub use validation_error::{LocationSegment, ValidationError};
