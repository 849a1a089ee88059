//! HTTP-level tests for the xAI client against a local mock server.

use std::time::Duration;
use wayfarer_core::{CompletionRequest, ExpectedShape};
use wayfarer_error::CompletionErrorKind;
use wayfarer_interface::CompletionClient;
use wayfarer_models::{LlmConfig, XaiClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> XaiClient {
    let config = LlmConfig::default()
        .with_api_key(Some("sk-test".to_string()))
        .with_base_url(server.uri())
        .with_timeout_secs(2u64);
    XaiClient::new(&config).expect("client should build")
}

fn request(shape: ExpectedShape) -> CompletionRequest {
    CompletionRequest::builder()
        .system("You are an expert travel planner.")
        .prompt("Plan a 1-day trip to Lisbon.")
        .shape(shape)
        .build()
        .expect("request should build")
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "grok-2",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn json_shape_requests_json_mode_and_parses_content() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "grok-2",
            "response_format": { "type": "json_object" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "```json\n{\"days\": [{\"day\": 1, \"activities\": [\"Tram 28\"]}]}\n```",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let output = client_for(&server)
        .complete(&request(ExpectedShape::Itinerary { days: 1 }))
        .await?;

    let json = output.json().expect("json payload");
    assert_eq!(json["days"][0]["activities"][0], "Tram 28");
    Ok(())
}

#[tokio::test]
async fn text_shape_returns_trimmed_text() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body("  Visit in May.  ")),
        )
        .mount(&server)
        .await;

    let output = client_for(&server)
        .complete(&request(ExpectedShape::Text))
        .await?;

    assert_eq!(output.text(), Some("Visit in May."));
    Ok(())
}

#[tokio::test]
async fn unauthorized_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&request(ExpectedShape::Text))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, CompletionErrorKind::Rejected { status: 401, .. }));
    assert!(!err.kind.is_recoverable());
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "2")
                .set_body_string("slow down"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&request(ExpectedShape::Text))
        .await
        .unwrap_err();

    assert_eq!(err.kind.retry_after(), Some(Duration::from_secs(2)));
    assert!(err.kind.is_recoverable());
}

#[tokio::test]
async fn exhausted_credits_are_not_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_string(r#"{"error": "Your team has run out of credits"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&request(ExpectedShape::Text))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, CompletionErrorKind::Rejected { status: 429, .. }));
}

#[tokio::test]
async fn server_error_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&request(ExpectedShape::Text))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        CompletionErrorKind::Upstream {
            status: Some(503),
            ..
        }
    ));
}

#[tokio::test]
async fn empty_choices_are_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": []
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&request(ExpectedShape::Text))
        .await
        .unwrap_err();

    assert!(err.kind.is_malformed());
}

#[tokio::test]
async fn invalid_envelope_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&request(ExpectedShape::Itinerary { days: 1 }))
        .await
        .unwrap_err();

    assert!(err.kind.is_malformed());
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = LlmConfig::default()
        .with_api_key(Some("sk-test".to_string()))
        .with_base_url(server.uri())
        .with_timeout_secs(1u64);
    let err = XaiClient::new(&config)
        .expect("client should build")
        .complete(&request(ExpectedShape::Text))
        .await
        .unwrap_err();

    assert_eq!(err.kind, CompletionErrorKind::Timeout);
}

#[tokio::test]
async fn connection_failure_is_upstream() {
    // Nothing listens on this port once the server is dropped
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let config = LlmConfig::default()
        .with_api_key(Some("sk-test".to_string()))
        .with_base_url(uri);

    let err = XaiClient::new(&config)
        .expect("client should build")
        .complete(&request(ExpectedShape::Text))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, CompletionErrorKind::Upstream { status: None, .. }));
}
