//! End-to-end reading flow against a mocked chat completions endpoint.

use regex::Regex;
use serde_json::json;
use tarot_core::Config;
use tarot_core::models::{Card, TarotRequest};
use tarot_core::reading::tarot_reading;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(api_url: String) -> Config {
    Config {
        api_url,
        auth_type: "Bearer".to_string(),
        api_key: "sk-test".to_string(),
        model: "gpt-4o-mini".to_string(),
        max_tokens: 500,
        temperature: 0.7,
        strip_pattern: Regex::new(r#"["*#_`]"#).unwrap(),
    }
}

fn spread_request() -> TarotRequest {
    TarotRequest {
        text: "Will the move go well?".to_string(),
        cards: vec![Card::new("Fool", false), Card::new("Tower", true)],
    }
}

#[tokio::test]
async fn reading_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(header("Content-Type", "application/json"))
        .and(body_string_contains("Fool, Tower (reversed)"))
        .and(body_string_contains("Will the move go well?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "*The Fool* opens the spread."}},
                {"message": {"role": "assistant", "content": "   "}},
                {"message": {"role": "assistant", "content": "The Tower reversed softens the upheaval."}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(format!("{}/v1/chat/completions", server.uri()));
    let response = tarot_reading(spread_request(), &config).await.unwrap();

    // Original cards come back untouched, answer fragments are stripped,
    // blank entries dropped and the rest newline-joined in order.
    assert_eq!(response.cards, spread_request().cards);
    assert_eq!(
        response.answer,
        "The Fool opens the spread.\nThe Tower reversed softens the upheaval."
    );
}

#[tokio::test]
async fn api_error_status_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let config = test_config(server.uri());
    let err = tarot_reading(spread_request(), &config).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("500"), "unexpected error: {message}");
    assert!(message.contains("upstream exploded"));
}

#[tokio::test]
async fn response_without_choices_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "resp_1"})))
        .mount(&server)
        .await;

    let config = test_config(server.uri());
    let err = tarot_reading(spread_request(), &config).await.unwrap_err();
    assert!(
        err.to_string().contains("Failed to parse chat API response"),
        "unexpected error: {err}"
    );
}
