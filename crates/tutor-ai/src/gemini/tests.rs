use serde_json::json;

use super::*;
use crate::{AiError, Message};

fn client() -> GeminiClient {
    GeminiClient::new(
        GeminiConfig::new("test-key")
            .with_model("gemini-1.5-pro")
            .with_temperature(0.7)
            .with_max_tokens(512),
    )
    .unwrap()
}

#[test]
fn api_url_targets_generate_content() {
    assert_eq!(
        client().api_url(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
    );
}

#[test]
fn request_body_maps_roles_and_lifts_system() {
    let messages = vec![
        Message::system("Only Data Science."),
        Message::user("U1"),
        Message::assistant("A1"),
        Message::user("U2"),
    ];

    let body = client().build_request_body(&messages);

    assert_eq!(
        body["contents"],
        json!([
            { "role": "user", "parts": [{ "text": "U1" }] },
            { "role": "model", "parts": [{ "text": "A1" }] },
            { "role": "user", "parts": [{ "text": "U2" }] },
        ])
    );
    assert_eq!(
        body["systemInstruction"],
        json!({ "parts": [{ "text": "Only Data Science." }] })
    );
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 512);
    assert_eq!(body["generationConfig"]["temperature"], 0.7);
}

#[test]
fn request_body_without_system_has_no_instruction() {
    let body = client().build_request_body(&[Message::user("hi")]);
    assert!(body.get("systemInstruction").is_none());
}

#[test]
fn parse_response_joins_parts_and_reads_usage() {
    let response = client()
        .parse_response(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Overfitting is " }, { "text": "when..." }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 40, "candidatesTokenCount": 12 }
        }))
        .unwrap();

    assert_eq!(response.content, "Overfitting is when...");
    assert_eq!(response.usage.input_tokens, 40);
    assert_eq!(response.usage.output_tokens, 12);
}

#[test]
fn parse_response_without_usage_defaults_to_zero() {
    let response = client()
        .parse_response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
        }))
        .unwrap();
    assert_eq!(response.usage.total_tokens(), 0);
}

#[test]
fn parse_response_rejects_missing_candidates() {
    let err = client()
        .parse_response(json!({ "error": { "message": "bad" } }))
        .unwrap_err();
    assert!(matches!(err, AiError::ParseError(_)));

    let err = client().parse_response(json!({ "candidates": [] })).unwrap_err();
    assert!(matches!(err, AiError::ParseError(_)));
}

#[test]
fn parse_response_reports_blocked_candidate() {
    let err = client()
        .parse_response(json!({ "candidates": [{ "finishReason": "SAFETY" }] }))
        .unwrap_err();
    assert!(err.to_string().contains("SAFETY"));
}

#[test]
fn config_debug_redacts_key() {
    let debug = format!("{:?}", GeminiConfig::new("super-secret"));
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn config_defaults() {
    let config = GeminiConfig::new("k");
    assert_eq!(config.model, "gemini-1.5-pro");
    assert_eq!(config.max_tokens, 4096);
    assert!((config.temperature - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.request_timeout.as_secs(), 120);
}

/// Guards `GOOGLE_API_KEY` for tests that rewrite it.
static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[test]
fn from_env_requires_a_non_blank_key() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let saved = std::env::var(API_KEY_ENV).ok();

    std::env::remove_var(API_KEY_ENV);
    assert!(matches!(
        GeminiConfig::from_env(),
        Err(AiError::MissingCredential(API_KEY_ENV))
    ));

    std::env::set_var(API_KEY_ENV, "   ");
    assert!(matches!(
        GeminiConfig::from_env(),
        Err(AiError::MissingCredential(API_KEY_ENV))
    ));

    std::env::set_var(API_KEY_ENV, " k ");
    assert_eq!(GeminiConfig::from_env().unwrap().api_key, "k");

    match saved {
        Some(value) => std::env::set_var(API_KEY_ENV, value),
        None => std::env::remove_var(API_KEY_ENV),
    }
}
