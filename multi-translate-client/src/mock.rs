//! In-memory transport for testing
//!
//! Answers requests without a network, in one of a few fixed modes, and keeps
//! a log of every request it saw so tests can assert on what was sent.
//!
//! # Example
//!
//! ```ignore
//! use multi_translate_client::{DefaultApi, MockMode, MockTransport};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let api = DefaultApi::new(MockTransport::new(MockMode::Suffix));
//!     let response = api.translate_post(&TranslationRequest::new("hello", "fr")).await.unwrap();
//!     assert_eq!(response.translated_text, "hello_fr");
//! }
//! ```

use crate::default_api::TRANSLATION_SOURCE_HEADER;
use crate::error::{ApiError, ApiResult};
use crate::transport::{HttpRequest, Method, RawResponse, Transport};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockMode {
    /// Translate by appending the target language: "hello" → "hello_fr"
    ///
    /// Behaves like the real service for `/` and `/translate` (GET and POST),
    /// including 422 bodies for missing required parameters.
    Suffix,

    /// Answer every request with this status and body
    Respond { status: u16, body: Value },

    /// Fail every request at the transport level
    Error(String),
}

#[derive(Debug)]
pub struct MockTransport {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Shorthand for [`MockMode::Respond`]
    pub fn responding(status: u16, body: Value) -> Self {
        Self::new(MockMode::Respond { status, body })
    }

    /// Every request sent so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn record(&self, request: &HttpRequest) {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }
    }

    fn suffix_response(request: &HttpRequest) -> RawResponse {
        match (request.method, request.path.as_str()) {
            (Method::Get, "/") => RawResponse::new(200, json!("ready")),
            (Method::Get, "/translate") => {
                let params = request
                    .query
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect::<serde_json::Map<_, _>>();
                Self::translate(&Value::Object(params), "query")
            }
            (Method::Post, "/translate") => {
                let body = request.body.clone().unwrap_or(Value::Null);
                Self::translate(&body, "body")
            }
            _ => RawResponse::new(404, json!({"detail": "Not Found"})),
        }
    }

    fn translate(params: &Value, location: &str) -> RawResponse {
        let missing: Vec<Value> = ["source_text", "to_language"]
            .iter()
            .filter(|field| params.get(**field).and_then(Value::as_str).is_none())
            .map(|field| {
                json!({
                    "loc": [location, field],
                    "msg": "field required",
                    "type": "value_error.missing"
                })
            })
            .collect();
        if !missing.is_empty() {
            return RawResponse::new(422, json!({ "detail": missing }));
        }

        let text = params["source_text"].as_str().unwrap_or_default();
        let to = params["to_language"].as_str().unwrap_or_default();
        let from = params.get("from_language").and_then(Value::as_str);
        let engine = match params.get("preferred_engine").and_then(Value::as_str) {
            Some("best") | None => "mock",
            Some(name) => name,
        };
        let with_alignment = matches!(
            params.get("with_alignment"),
            Some(Value::Bool(true))
        ) || params.get("with_alignment").and_then(Value::as_str) == Some("true");

        let translated = format!("{}_{}", text, to);
        let mut body = json!({
            "engine": engine,
            "engine_version": "1",
            "from_language": from.unwrap_or("en"),
            "to_language": to,
            "source_text": text,
            "translated_text": translated,
        });
        if from.is_none() {
            body["detected_language_confidence"] = json!(0.9);
        }
        if with_alignment {
            let last = |s: &str| s.chars().count().saturating_sub(1).to_string();
            body["alignment"] = json!([{
                "src": {"start": "0", "end": last(text), "text": text},
                "dest": {"start": "0", "end": last(&translated), "text": translated},
            }]);
        }

        RawResponse::new(200, body).with_header(TRANSLATION_SOURCE_HEADER, "api")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<RawResponse> {
        self.apply_delay().await;
        self.record(&request);

        match &self.mode {
            MockMode::Suffix => Ok(Self::suffix_response(&request)),
            MockMode::Respond { status, body } => Ok(RawResponse::new(*status, body.clone())),
            MockMode::Error(msg) => Err(ApiError::Transport(msg.clone())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
