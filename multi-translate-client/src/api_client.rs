//! Generic request plumbing shared by every API operation
//!
//! [`ApiClient`] sends an [`HttpRequest`] through a [`Transport`], turns
//! non-success statuses into [`ApiError`]s and coerces successful bodies into
//! the declared [`Shape`] of the operation.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::transport::{HttpRequest, RawResponse, ReqwestTransport, Transport};
use multi_translate::{Coercion, HttpValidationError, Model, Shape, decode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Status of a request rejected by parameter validation
pub const VALIDATION_ERROR_STATUS: u16 = 422;

/// A decoded response body together with its HTTP metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    /// Header names are lowercase
    pub headers: HashMap<String, String>,
}

impl<T> ApiResponse<T> {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            status: self.status,
            headers: self.headers,
        }
    }
}

pub struct ApiClient<T: Transport> {
    transport: Arc<T>,
    coercion: Coercion,
}

impl<T: Transport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            coercion: self.coercion,
        }
    }
}

impl ApiClient<ReqwestTransport> {
    /// Client talking HTTP to `config.base_url`
    pub fn from_config(config: ClientConfig) -> ApiResult<Self> {
        let coercion = config.coercion;
        Ok(Self::new(ReqwestTransport::new(config)?).with_coercion(coercion))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Share one transport (and its connection pool or request log) between clients
    pub fn from_shared(transport: Arc<T>) -> Self {
        Self {
            transport,
            coercion: Coercion::Strict,
        }
    }

    pub fn with_coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = coercion;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn coercion(&self) -> Coercion {
        self.coercion
    }

    /// Send a request and map the status; the body is returned untouched
    pub async fn call_api(&self, request: HttpRequest) -> ApiResult<ApiResponse<Value>> {
        debug!(
            transport = self.transport.name(),
            "{} {} ({} query params)",
            request.method,
            request.path,
            request.query.len()
        );

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(self.error_for(response));
        }

        Ok(ApiResponse {
            data: response.body,
            status: response.status,
            headers: response.headers,
        })
    }

    /// Send a request and coerce the response body into `shape`
    pub async fn call<M: DeserializeOwned>(
        &self,
        request: HttpRequest,
        shape: &Shape,
    ) -> ApiResult<ApiResponse<M>> {
        let response = self.call_api(request).await?;
        let data = self.deserialize(&response.data, shape)?;
        Ok(ApiResponse {
            data,
            status: response.status,
            headers: response.headers,
        })
    }

    /// Coerce a raw body into `shape` using this client's coercion mode
    pub fn deserialize<M: DeserializeOwned>(&self, data: &Value, shape: &Shape) -> ApiResult<M> {
        Ok(decode(data, shape, self.coercion)?)
    }

    fn error_for(&self, response: RawResponse) -> ApiError {
        let status = response.status;
        debug!("request failed with status {}", status);

        if status == VALIDATION_ERROR_STATUS {
            if let Ok(error) = HttpValidationError::construct_from_object_with(&response.body, self.coercion) {
                return ApiError::Validation { status, error };
            }
        }

        ApiError::Status {
            status,
            body: body_text(&response.body),
        }
    }
}

/// Serialize a model for use as a request body
pub fn encode_body<M: Model>(model: &M) -> ApiResult<Value> {
    model.to_value().map_err(ApiError::Encode)
}

/// Render a value for use as a query parameter
///
/// `null` yields `None` so the parameter is left out. Arrays are joined with
/// commas, objects are sent as compact JSON.
pub fn param_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(param_to_string)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

fn body_text(body: &Value) -> String {
    match body {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockMode, MockTransport};
    use multi_translate::{TranslationResponse, ValueKind};
    use serde_json::json;

    #[test]
    fn test_param_to_string() {
        assert_eq!(param_to_string(&json!(null)), None);
        assert_eq!(param_to_string(&json!("fr")), Some("fr".to_string()));
        assert_eq!(param_to_string(&json!(true)), Some("true".to_string()));
        assert_eq!(param_to_string(&json!(false)), Some("false".to_string()));
        assert_eq!(param_to_string(&json!(3)), Some("3".to_string()));
        assert_eq!(param_to_string(&json!(["a", 1, null])), Some("a,1".to_string()));
        assert_eq!(param_to_string(&json!({"a": 1})), Some("{\"a\":1}".to_string()));
    }

    #[test]
    fn test_body_text() {
        assert_eq!(body_text(&Value::Null), "");
        assert_eq!(body_text(&json!("oops")), "oops");
        assert_eq!(body_text(&json!({"detail": "x"})), "{\"detail\":\"x\"}");
    }

    #[test]
    fn test_api_response_map_and_header() {
        let response = ApiResponse {
            data: 2,
            status: 200,
            headers: HashMap::from([("x-translation-source".to_string(), "database".to_string())]),
        };
        assert_eq!(response.header("X-Translation-Source"), Some("database"));
        let mapped = response.map(|n| n * 10);
        assert_eq!(mapped.data, 20);
        assert_eq!(mapped.status, 200);
    }

    #[tokio::test]
    async fn test_call_api_success() {
        let client = ApiClient::new(MockTransport::new(MockMode::Suffix));
        let response = client.call_api(HttpRequest::get("/")).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.data, json!("ready"));
    }

    #[tokio::test]
    async fn test_call_typed() {
        let client = ApiClient::new(MockTransport::new(MockMode::Suffix));
        let request = HttpRequest::get("/translate")
            .with_query("source_text", "hi")
            .with_query("to_language", "fr");
        let response: ApiResponse<TranslationResponse> = client
            .call(request, &TranslationResponse::shape())
            .await
            .unwrap();
        assert_eq!(response.data.translated_text, "hi_fr");
        assert_eq!(response.header("x-translation-source"), Some("api"));
    }

    #[tokio::test]
    async fn test_422_maps_to_validation() {
        let body = json!({"detail": [{"loc": ["query", "to_language"], "msg": "field required", "type": "value_error.missing"}]});
        let client = ApiClient::new(MockTransport::responding(422, body));
        match client.call_api(HttpRequest::get("/translate")).await {
            Err(ApiError::Validation { status, error }) => {
                assert_eq!(status, 422);
                assert_eq!(error.errors().len(), 1);
                assert_eq!(error.errors()[0].location(), "query.to_language");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_422_with_unexpected_body_maps_to_status() {
        let client = ApiClient::new(MockTransport::responding(422, json!({"detail": "nope"})));
        match client.call_api(HttpRequest::get("/translate")).await {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, 422);
                assert!(body.contains("nope"));
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let client = ApiClient::new(MockTransport::responding(500, json!("Internal Server Error")));
        match client.call_api(HttpRequest::get("/")).await {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "Internal Server Error");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_shape_mismatch_maps_to_coercion() {
        let client = ApiClient::new(MockTransport::responding(200, json!({"engine": 1})));
        let result: ApiResult<ApiResponse<TranslationResponse>> = client
            .call(HttpRequest::get("/translate"), &TranslationResponse::shape())
            .await;
        match result {
            Err(ApiError::Coercion(mismatch)) => {
                assert_eq!(mismatch.path.to_string(), "engine");
                assert_eq!(mismatch.actual, ValueKind::Number);
            }
            other => panic!("Expected Coercion error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lenient_client() {
        let body = json!({
            "engine": "google",
            "engine_version": 3,
            "from_language": "en",
            "to_language": "fr",
            "source_text": "hi",
            "translated_text": "salut",
            "detected_language_confidence": "0.5"
        });
        let strict = ApiClient::new(MockTransport::responding(200, body.clone()));
        let result: ApiResult<ApiResponse<TranslationResponse>> = strict
            .call(HttpRequest::get("/translate"), &TranslationResponse::shape())
            .await;
        assert!(result.is_err());

        let lenient = ApiClient::new(MockTransport::responding(200, body)).with_coercion(Coercion::Lenient);
        let response: ApiResponse<TranslationResponse> = lenient
            .call(HttpRequest::get("/translate"), &TranslationResponse::shape())
            .await
            .unwrap();
        assert_eq!(response.data.engine_version, "3");
        assert_eq!(response.data.detected_language_confidence, Some(0.5));
    }

    #[tokio::test]
    async fn test_shared_transport() {
        let transport = Arc::new(MockTransport::new(MockMode::Suffix));
        let a = ApiClient::from_shared(Arc::clone(&transport));
        let b = a.clone();
        a.call_api(HttpRequest::get("/")).await.unwrap();
        b.call_api(HttpRequest::get("/")).await.unwrap();
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn test_from_config_uses_coercion() {
        let config = ClientConfig::default().with_coercion(Coercion::Lenient);
        let client = ApiClient::from_config(config).unwrap();
        assert_eq!(client.coercion(), Coercion::Lenient);
        assert_eq!(client.transport().config().base_url, "http://localhost");
    }
}
