//! End-to-end tests through the public client surface
//!
//! Most tests run against [`MockTransport`]. The `#[ignore]` tests talk to a
//! running service:
//!
//! ```bash
//! export MULTI_TRANSLATE_BASE_URL=http://localhost:8000
//! cargo test -p multi-translate-client integration_tests -- --ignored --nocapture
//! ```

#[cfg(test)]
mod tests {
    use crate::*;
    use multi_translate::{Coercion, Engine, Model, TranslationRequest, TranslationResponse, ValueKind};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// Skip test if no service is configured
    fn require_service() -> bool {
        std::env::var(config::BASE_URL_VAR).is_ok()
    }

    fn full_response_body() -> serde_json::Value {
        json!({
            "engine": "microsoft",
            "engine_version": "3.0",
            "detected_language_confidence": 0.98,
            "from_language": "en",
            "to_language": "ko",
            "source_text": "hello world",
            "translated_text": "안녕하세요 세계",
            "alignment": [
                {"src": {"start": "0", "end": "4", "text": "hello"},
                 "dest": {"start": "0", "end": "4", "text": "안녕하세요"}},
                {"src": {"start": "6", "end": "10", "text": "world"},
                 "dest": {"start": "6", "end": "7", "text": "세계"}}
            ]
        })
    }

    // ========================================================================
    // Request defaults
    // ========================================================================

    #[tokio::test]
    async fn test_minimal_request_sends_documented_defaults() {
        let transport = Arc::new(MockTransport::new(MockMode::Suffix));
        let api = DefaultApi::from_shared(Arc::clone(&transport));

        let request = TranslationRequest::construct_from_object(&json!({
            "source_text": "hi",
            "to_language": "fr",
            "extra_unknown_field": 1
        }))
        .unwrap();
        api.translate_post(&request).await.unwrap();

        let body = transport.last_request().unwrap().body.unwrap();
        assert_eq!(body["preferred_engine"], json!("best"));
        assert_eq!(body["with_alignment"], json!(false));
        assert_eq!(body["fallback"], json!(false));
        assert!(body.get("from_language").is_none());
        assert!(body.get("extra_unknown_field").is_none());
    }

    // ========================================================================
    // Response decoding
    // ========================================================================

    #[tokio::test]
    async fn test_full_response_round_trip() {
        let api = DefaultApi::new(MockTransport::responding(200, full_response_body()));
        let response = api
            .translate_post(&TranslationRequest::new("hello world", "ko"))
            .await
            .unwrap();

        assert_eq!(response.engine_label(), "microsoft (3.0)");
        assert_eq!(response.detected_language_confidence, Some(0.98));
        let alignment = response.alignment.as_ref().unwrap();
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment[1]["dest"]["text"], "세계");

        // encode and decode again through the echoing mock
        let echoed = DefaultApi::new(MockTransport::responding(200, response.to_value().unwrap()));
        let again = echoed
            .translate_post(&TranslationRequest::new("hello world", "ko"))
            .await
            .unwrap();
        assert_eq!(again, response);

        let sections = response.alignment_sections().unwrap();
        assert_eq!(sections[0].src.text, "hello");
        assert_eq!(sections[1].src.start, 6);
        assert_eq!(sections[1].dest.end, 7);
    }

    #[tokio::test]
    async fn test_empty_alignment_is_present() {
        let mut body = full_response_body();
        body["alignment"] = json!([]);
        let api = DefaultApi::new(MockTransport::responding(200, body));
        let response = api.translate_get("hello world", "ko", &TranslateOptions::new()).await.unwrap();
        assert_eq!(response.alignment, Some(Vec::<BTreeMap<_, _>>::new()));
        assert!(response.alignment_sections().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_engine_is_shape_mismatch() {
        let mut body = full_response_body();
        body.as_object_mut().unwrap().remove("engine");
        let api = DefaultApi::new(MockTransport::responding(200, body));

        match api.translate_post(&TranslationRequest::new("hello world", "ko")).await {
            Err(ApiError::Coercion(mismatch)) => {
                assert_eq!(mismatch.path.to_string(), "engine");
                assert_eq!(mismatch.expected, "string");
                assert_eq!(mismatch.actual, ValueKind::Absent);
                assert!(mismatch.is_missing());
            }
            other => panic!("Expected Coercion error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bad_alignment_reports_nested_path() {
        let mut body = full_response_body();
        body["alignment"][1]["src"]["start"] = json!(6);
        let api = DefaultApi::new(MockTransport::responding(200, body));

        match api.translate_post(&TranslationRequest::new("hello world", "ko")).await {
            Err(ApiError::Coercion(mismatch)) => {
                assert_eq!(mismatch.path.to_string(), "alignment[1].src.start");
                assert_eq!(mismatch.actual, ValueKind::Number);
            }
            other => panic!("Expected Coercion error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lenient_client_accepts_numeric_offsets() {
        let mut body = full_response_body();
        body["alignment"][1]["src"]["start"] = json!(6);
        let client = ApiClient::new(MockTransport::responding(200, body)).with_coercion(Coercion::Lenient);
        let api = DefaultApi::with_client(client);

        let response = api
            .translate_post(&TranslationRequest::new("hello world", "ko"))
            .await
            .unwrap();
        assert_eq!(response.alignment.unwrap()[1]["src"]["start"], "6");
    }

    // ========================================================================
    // Error mapping
    // ========================================================================

    #[tokio::test]
    async fn test_validation_error_from_service() {
        let body = json!({"detail": [{"loc": ["body", "to_language"], "msg": "field required", "type": "value_error.missing"}]});
        let api = DefaultApi::new(MockTransport::responding(422, body));

        let err = api
            .translate_post(&TranslationRequest::new("hi", "fr"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(422));
        match err {
            ApiError::Validation { error, .. } => {
                let errors = error.errors();
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].loc.len(), 2);
                assert_eq!(errors[0].location(), "body.to_language");
                assert_eq!(errors[0].msg, "field required");
                assert_eq!(errors[0].kind, "value_error.missing");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mock_service_rejects_missing_query_param() {
        let api = DefaultApi::new(MockTransport::new(MockMode::Suffix));
        let result = api
            .client()
            .call_api(HttpRequest::get("/translate").with_query("source_text", "hi"))
            .await;
        match result {
            Err(ApiError::Validation { error, .. }) => {
                assert_eq!(error.to_string(), "query.to_language: field required");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let api = DefaultApi::new(MockTransport::new(MockMode::Error("connection refused".to_string())));
        match api.ready().await {
            Err(ApiError::Transport(msg)) => assert_eq!(msg, "connection refused"),
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }

    // ========================================================================
    // Translation source and concurrency
    // ========================================================================

    #[tokio::test]
    async fn test_translation_source_header() {
        let api = DefaultApi::new(MockTransport::new(MockMode::Suffix));
        let response = api
            .translate_get_with_http_info("hi", "fr", &TranslateOptions::new().with_alignment(true))
            .await
            .unwrap();
        assert_eq!(response.translation_source(), Some(TranslationSource::Api));
        let sections = response.data.alignment_sections().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].dest.text, "hi_fr");
        assert_eq!(sections[0].dest.end, 4);
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_client() {
        let transport = Arc::new(MockTransport::with_delay(MockMode::Suffix, 50));
        let api = DefaultApi::from_shared(Arc::clone(&transport));

        let first = TranslationRequest::new("one", "fr");
        let second = TranslationRequest::new("two", "de").with_engine(Engine::Google);
        let start = Instant::now();
        let (a, b, c) = tokio::join!(
            api.translate_post(&first),
            api.translate_post(&second),
            api.ready(),
        );
        let elapsed = start.elapsed();

        assert_eq!(a.unwrap().translated_text, "one_fr");
        assert_eq!(b.unwrap().engine, "google");
        assert_eq!(c.unwrap(), "ready");
        assert_eq!(transport.requests().len(), 3);
        assert!(elapsed < Duration::from_millis(150), "calls ran serially: {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_translation_service_over_mock() {
        let api = DefaultApi::new(MockTransport::new(MockMode::Suffix));
        let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
        let results = api.translate_batch(&texts, Some("en"), "es-MX").await.unwrap();
        assert_eq!(results, vec!["Hello_es", "Goodbye_es"]);
    }

    // ========================================================================
    // Live service
    // ========================================================================

    #[tokio::test]
    #[ignore]
    async fn test_live_ready() {
        if !require_service() {
            eprintln!("⚠️  Skipping: {} not set", config::BASE_URL_VAR);
            return;
        }

        let api = DefaultApi::from_env().expect("Failed to create client");
        let status = api.ready().await.expect("ready check failed");
        println!("ready: {}", status);
        assert_eq!(status, "ready");
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_translate_post() {
        if !require_service() {
            eprintln!("⚠️  Skipping: {} not set", config::BASE_URL_VAR);
            return;
        }

        let api = DefaultApi::from_env().expect("Failed to create client");
        let request = TranslationRequest::new("Hello, world!", "fr")
            .with_from_language("en")
            .with_fallback(true);
        let start = Instant::now();
        let response = api
            .translate_post_with_http_info(&request)
            .await
            .expect("translation failed");
        println!(
            "{} via {} in {:?} (source: {:?})",
            response.data.translated_text,
            response.data.engine_label(),
            start.elapsed(),
            response.translation_source()
        );
        assert_eq!(response.data.to_language, "fr");
        assert!(!response.data.translated_text.is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_translate_get_with_detection() {
        if !require_service() {
            eprintln!("⚠️  Skipping: {} not set", config::BASE_URL_VAR);
            return;
        }

        let api = DefaultApi::from_env().expect("Failed to create client");
        let response: TranslationResponse = api
            .translate_get("Guten Morgen", "en", &TranslateOptions::new().with_fallback(true))
            .await
            .expect("translation failed");
        println!("{:?}", response);
        assert_eq!(response.from_language, "de");
    }
}
