//! Operations of the multi-translate service
//!
//! | Operation         | Method | Path         | Returns               |
//! |-------------------|--------|--------------|-----------------------|
//! | [`DefaultApi::ready`]          | GET  | `/`          | `String`              |
//! | [`DefaultApi::translate_get`]  | GET  | `/translate` | `TranslationResponse` |
//! | [`DefaultApi::translate_post`] | POST | `/translate` | `TranslationResponse` |
//!
//! Every operation has a `*_with_http_info` twin that also returns the status
//! and response headers.

use crate::api_client::{ApiClient, ApiResponse, encode_body, param_to_string};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::translator::validate_request;
use multi_translate::{Engine, Model, Shape, TranslationRequest, TranslationResponse};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Response header telling whether a translation was served from the cache
pub const TRANSLATION_SOURCE_HEADER: &str = "x-translation-source";

/// Where the service got a translation from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationSource {
    /// Previously stored translation
    Database,
    /// Fresh call to an engine
    Api,
}

impl TranslationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationSource::Database => "database",
            TranslationSource::Api => "api",
        }
    }
}

impl fmt::Display for TranslationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" => Ok(TranslationSource::Database),
            "api" => Ok(TranslationSource::Api),
            other => Err(format!("unknown translation source '{}'", other)),
        }
    }
}

impl<T> ApiResponse<T> {
    /// Value of the `X-Translation-Source` header, if present and recognised
    pub fn translation_source(&self) -> Option<TranslationSource> {
        let raw = self.header(TRANSLATION_SOURCE_HEADER)?;
        match raw.parse() {
            Ok(source) => Some(source),
            Err(e) => {
                warn!("ignoring {} header: {}", TRANSLATION_SOURCE_HEADER, e);
                None
            }
        }
    }
}

/// Optional parameters of `GET /translate`
///
/// Unset options are left out of the query string so the service applies its
/// own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslateOptions {
    pub from_language: Option<String>,
    pub preferred_engine: Option<Engine>,
    pub with_alignment: Option<bool>,
    pub fallback: Option<bool>,
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from_language(mut self, from_language: impl Into<String>) -> Self {
        self.from_language = Some(from_language.into());
        self
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.preferred_engine = Some(engine);
        self
    }

    pub fn with_alignment(mut self, with_alignment: bool) -> Self {
        self.with_alignment = Some(with_alignment);
        self
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = Some(fallback);
        self
    }

    fn query(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("from_language", self.from_language.clone().map(Value::String).unwrap_or(Value::Null)),
            (
                "preferred_engine",
                self.preferred_engine
                    .map(|e| Value::String(e.as_str().to_string()))
                    .unwrap_or(Value::Null),
            ),
            ("with_alignment", self.with_alignment.map(Value::Bool).unwrap_or(Value::Null)),
            ("fallback", self.fallback.map(Value::Bool).unwrap_or(Value::Null)),
        ]
    }

    /// The equivalent request body, with unset options at their defaults
    pub fn to_request(&self, source_text: &str, to_language: &str) -> TranslationRequest {
        TranslationRequest {
            source_text: source_text.to_string(),
            to_language: to_language.to_string(),
            from_language: self.from_language.clone(),
            preferred_engine: self.preferred_engine.unwrap_or_default(),
            with_alignment: self.with_alignment.unwrap_or(false),
            fallback: self.fallback.unwrap_or(false),
        }
    }
}

impl From<&TranslationRequest> for TranslateOptions {
    fn from(request: &TranslationRequest) -> Self {
        Self {
            from_language: request.from_language.clone(),
            preferred_engine: Some(request.preferred_engine),
            with_alignment: Some(request.with_alignment),
            fallback: Some(request.fallback),
        }
    }
}

/// Typed access to the service
pub struct DefaultApi<T: Transport = ReqwestTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> Clone for DefaultApi<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl DefaultApi<ReqwestTransport> {
    pub fn from_config(config: ClientConfig) -> ApiResult<Self> {
        Ok(Self::with_client(ApiClient::from_config(config)?))
    }

    /// Build a client from `MULTI_TRANSLATE_*` environment variables
    pub fn from_env() -> ApiResult<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }
}

impl<T: Transport> DefaultApi<T> {
    pub fn new(transport: T) -> Self {
        Self::with_client(ApiClient::new(transport))
    }

    pub fn from_shared(transport: Arc<T>) -> Self {
        Self::with_client(ApiClient::from_shared(transport))
    }

    pub fn with_client(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Liveness check; the service answers `"ready"`
    pub async fn ready(&self) -> ApiResult<String> {
        Ok(self.ready_with_http_info().await?.data)
    }

    pub async fn ready_with_http_info(&self) -> ApiResult<ApiResponse<String>> {
        self.client.call(HttpRequest::get("/"), &Shape::String).await
    }

    /// Translate text passed as query parameters
    pub async fn translate_get(
        &self,
        source_text: &str,
        to_language: &str,
        options: &TranslateOptions,
    ) -> ApiResult<TranslationResponse> {
        Ok(self
            .translate_get_with_http_info(source_text, to_language, options)
            .await?
            .data)
    }

    pub async fn translate_get_with_http_info(
        &self,
        source_text: &str,
        to_language: &str,
        options: &TranslateOptions,
    ) -> ApiResult<ApiResponse<TranslationResponse>> {
        validate_request(&options.to_request(source_text, to_language))?;

        let mut request = HttpRequest::get("/translate")
            .with_query("source_text", source_text)
            .with_query("to_language", to_language);
        for (name, value) in options.query() {
            if let Some(value) = param_to_string(&value) {
                request = request.with_query(name, value);
            }
        }

        let response = self.client.call(request, &TranslationResponse::shape()).await?;
        log_source(&response);
        Ok(response)
    }

    /// Translate text passed as a JSON body
    pub async fn translate_post(
        &self,
        translation_request: &TranslationRequest,
    ) -> ApiResult<TranslationResponse> {
        Ok(self.translate_post_with_http_info(translation_request).await?.data)
    }

    pub async fn translate_post_with_http_info(
        &self,
        translation_request: &TranslationRequest,
    ) -> ApiResult<ApiResponse<TranslationResponse>> {
        validate_request(translation_request)?;

        let body = encode_body(translation_request)?;
        if !body.is_object() {
            return Err(ApiError::InvalidRequest(
                "translation request did not serialize to an object".to_string(),
            ));
        }

        let request = HttpRequest::post("/translate", body);
        let response = self.client.call(request, &TranslationResponse::shape()).await?;
        log_source(&response);
        Ok(response)
    }
}

fn log_source(response: &ApiResponse<TranslationResponse>) {
    debug!(
        engine = %response.data.engine_label(),
        source = response.translation_source().map(|s| s.as_str()).unwrap_or("unknown"),
        "{} → {}",
        response.data.from_language,
        response.data.to_language
    );
}
