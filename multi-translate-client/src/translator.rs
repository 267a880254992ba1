//! Plain text translation on top of [`DefaultApi`]
//!
//! [`TranslationService`] hides the request and response models for callers
//! that only want strings back.
//!
//! # Example
//!
//! ```ignore
//! use multi_translate_client::{DefaultApi, TranslationService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = DefaultApi::from_env()?;
//!
//!     let result = api.translate("Hello, world!", Some("en"), "fr").await?;
//!     println!("{}", result);
//!
//!     let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
//!     let results = api.translate_batch(&texts, None, "fr").await?;
//!     println!("{:?}", results);
//!
//!     Ok(())
//! }
//! ```

use crate::default_api::DefaultApi;
use crate::error::{ApiError, ApiResult};
use crate::transport::Transport;
use async_trait::async_trait;
use multi_translate::TranslationRequest;
use regex::Regex;
use std::sync::LazyLock;

static LANGUAGE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,2}$").expect("language code regex should be valid"));

#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translate a single text
    ///
    /// `from_language` of `None` asks the service to detect the source
    /// language. Codes may carry a region (`en-US`); only the base language is
    /// sent.
    async fn translate(
        &self,
        text: &str,
        from_language: Option<&str>,
        to_language: &str,
    ) -> ApiResult<String>;

    /// Translate several texts
    ///
    /// Output order and length match the input.
    async fn translate_batch(
        &self,
        texts: &[String],
        from_language: Option<&str>,
        to_language: &str,
    ) -> ApiResult<Vec<String>>;

    /// Used in log lines
    fn provider_name(&self) -> &str;
}

/// Strip region information from a language code
///
/// - `en-US` → `en`
/// - `pt_BR` → `pt`
/// - `FR` → `fr`
pub fn normalize_language(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Check that `code` could be an ISO-639-1 code
///
/// The service only caps codes at two characters; empty codes and codes with
/// anything but ASCII letters are refused here as well.
pub fn validate_language(code: &str) -> ApiResult<()> {
    if LANGUAGE_CODE.is_match(code) {
        Ok(())
    } else {
        Err(ApiError::InvalidRequest(format!(
            "'{}' is not an ISO-639-1 language code",
            code
        )))
    }
}

/// Reject requests the service would answer with a 422
pub fn validate_request(request: &TranslationRequest) -> ApiResult<()> {
    validate_language(&request.to_language)?;
    if let Some(from) = &request.from_language {
        validate_language(from)?;
    }
    Ok(())
}

#[async_trait]
impl<T: Transport> TranslationService for DefaultApi<T> {
    async fn translate(
        &self,
        text: &str,
        from_language: Option<&str>,
        to_language: &str,
    ) -> ApiResult<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let mut request = TranslationRequest::new(text, normalize_language(to_language));
        if let Some(from) = from_language {
            request = request.with_from_language(normalize_language(from));
        }

        Ok(self.translate_post(&request).await?.translated_text)
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        from_language: Option<&str>,
        to_language: &str,
    ) -> ApiResult<Vec<String>> {
        // No batch endpoint; one call per text keeps results in order
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.translate(text, from_language, to_language).await?);
        }
        Ok(results)
    }

    fn provider_name(&self) -> &str {
        self.client().transport().name()
    }
}
