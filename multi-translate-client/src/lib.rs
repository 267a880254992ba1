//! Async client for the multi-translate translation aggregation API
//!
//! The service routes a text to one of several translation engines, caches the
//! result and reports where it came from. This crate sends the requests and
//! shape-checks every response through the [`multi_translate`] models.
//!
//! # Example
//!
//! ```ignore
//! use multi_translate_client::{DefaultApi, TranslateOptions};
//! use multi_translate::{Engine, TranslationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Configure from MULTI_TRANSLATE_BASE_URL
//!     let api = DefaultApi::from_env()?;
//!
//!     // 2. Translate with a JSON body
//!     let request = TranslationRequest::new("Hello, world!", "fr").with_engine(Engine::Deepl);
//!     let response = api.translate_post_with_http_info(&request).await?;
//!     println!("{} ({:?})", response.data.translated_text, response.translation_source());
//!
//!     // 3. Or with query parameters
//!     let options = TranslateOptions::new().with_from_language("en");
//!     let response = api.translate_get("Goodbye", "de", &options).await?;
//!     println!("{}", response.translated_text);
//!
//!     Ok(())
//! }
//! ```

pub mod api_client;
pub mod config;
pub mod default_api;
pub mod error;
pub mod mock;
pub mod translator;
pub mod transport;

// Integration tests (only available during testing)
#[cfg(test)]
mod integration_tests;

pub use api_client::{ApiClient, ApiResponse, encode_body, param_to_string};
pub use config::ClientConfig;
pub use default_api::{DefaultApi, TRANSLATION_SOURCE_HEADER, TranslateOptions, TranslationSource};
pub use error::{ApiError, ApiResult};
pub use mock::{MockMode, MockTransport};
pub use translator::{TranslationService, normalize_language, validate_language, validate_request};
pub use transport::{HttpRequest, Method, RawResponse, ReqwestTransport, Transport};
