//! Gemini provider tests against a local `wiremock` server.

use search_service::config::ModelSelection;
use search_service::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use search_service::services::providers::{ProviderError, TextProvider};
use search_service::services::AnswerService;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";

fn provider_for(server: &MockServer) -> GeminiTextProvider {
    let mut config = GeminiConfig::new(API_KEY);
    config.api_base = server.uri();
    GeminiTextProvider::new(config).expect("Failed to build provider")
}

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 5}
    })
}

#[tokio::test]
async fn generate_posts_prompt_with_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "What is AI?"}]}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("AI is artificial intelligence")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = provider_for(&server)
        .generate("models/gemini-2.5-flash", "What is AI?")
        .await
        .expect("generate should succeed");

    assert_eq!(response.text, "AI is artificial intelligence");
    assert_eq!(response.input_tokens, 3);
    assert_eq!(response.output_tokens, 5);
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate("gemini-2.5-flash", "q")
        .await
        .unwrap_err();

    assert_eq!(err, ProviderError::RateLimited);
}

#[tokio::test]
async fn api_errors_carry_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 404, "message": "models/nope is not found", "status": "NOT_FOUND"}
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate("models/nope", "q")
        .await
        .unwrap_err();

    match err {
        ProviderError::ApiError(msg) => {
            assert!(msg.contains("404"));
            assert!(msg.contains("models/nope is not found"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_provider_is_network_error_without_key() {
    // Grab a free port, then release it so connections are refused.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let mut config = GeminiConfig::new(API_KEY);
    config.api_base = format!("http://127.0.0.1:{}", port);

    let err = GeminiTextProvider::new(config)
        .unwrap()
        .generate("gemini-2.5-flash", "q")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NetworkError(_)));
    assert!(!err.to_string().contains(API_KEY));
}

#[tokio::test]
async fn answer_service_falls_back_between_gemini_models() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-flash-latest:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Fallback response")))
        .expect(1)
        .mount(&server)
        .await;

    let service = AnswerService::new(Arc::new(provider_for(&server)), ModelSelection::default());

    assert_eq!(service.answer("Test query").await, "Fallback response");
}

#[tokio::test]
async fn answer_service_reports_primary_gemini_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("primary boom"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-flash-latest:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("fallback boom"))
        .mount(&server)
        .await;

    let service = AnswerService::new(Arc::new(provider_for(&server)), ModelSelection::default());
    let answer = service.answer("Test query").await;

    assert!(answer.starts_with("Error: API error: Gemini API error 500"));
    assert!(answer.contains("primary boom"));
    assert!(!answer.contains("fallback boom"));
}

#[tokio::test]
async fn health_check_lists_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("x-goog-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .mount(&server)
        .await;

    assert!(provider_for(&server).health_check().await.is_ok());
}

#[tokio::test]
async fn health_check_fails_on_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = provider_for(&server).health_check().await.unwrap_err();
    assert!(matches!(err, ProviderError::ApiError(_)));
}

#[tokio::test]
async fn health_check_requires_api_key() {
    let provider = GeminiTextProvider::new(GeminiConfig::new("")).unwrap();

    let err = provider.health_check().await.unwrap_err();
    assert!(matches!(err, ProviderError::NotConfigured(_)));
}
