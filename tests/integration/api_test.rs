//! HTTP API Integration Tests
//!
//! Sends requests through the full router, backed by the stub model server:
//! - Liveness routes
//! - Survey generation, including line-mode replies and empty replies
//! - Request validation and provider error mapping
//! - Prompt-based survey drafts

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use smart_survey::{build_router, AppConfig, AppState};

use crate::support::{spawn_stub, Reply, StubServer};

fn app_for(stub: &StubServer, models: &[&str]) -> Router {
    let config = AppConfig {
        api_key: Some("sk-test".to_string()),
        base_url: Some(stub.chat_url.clone()),
        models: models.iter().map(|m| m.to_string()).collect(),
        request_timeout_secs: 5,
        ..Default::default()
    };
    build_router(AppState::from_config(config).unwrap())
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

const RADIO_REPLY: &str =
    r#"[{"text":"Rate our service","type":"radio","options":["Good","Bad"]},{"text":"Anything else?"}]"#;

// ============================================================================
// Liveness
// ============================================================================

#[tokio::test]
async fn test_root_status() {
    let stub = spawn_stub(&[]).await;
    let (status, body) = send(app_for(&stub, &["m"]), Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "message": "Smart Survey API is running"}));
}

#[tokio::test]
async fn test_healthz_reports_primary_model() {
    let stub = spawn_stub(&[]).await;
    let (status, body) =
        send(app_for(&stub, &["gpt-4o-mini", "gpt-4.1-nano"]), Method::GET, "/healthz", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "openai");
    assert_eq!(body["model"], "gpt-4o-mini");
    assert!(stub.requests().is_empty());
}

// ============================================================================
// POST /api/survey
// ============================================================================

#[tokio::test]
async fn test_generate_survey() {
    let stub = spawn_stub(&[("m", Reply::Content(RADIO_REPLY.to_string()))]).await;
    let (status, body) = send(
        app_for(&stub, &["m"]),
        Method::POST,
        "/api/survey",
        Some(json!({"topic": "Customer service", "num_questions": 2, "voice_enabled": true})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "m");
    assert_eq!(body["requested_count"], 2);
    assert_eq!(body["requested_language"], "en");

    let first = &body["questions"][0];
    assert_eq!(first["type"], "radio");
    assert_eq!(first["options"], json!(["Good", "Bad"]));
    assert_eq!(first["ai_generated"], true);
    assert_eq!(first["voice_enabled"], true);
    assert_eq!(first["adaptive_enabled"], true);
    assert_eq!(first["audio_metadata"], json!({}));
    assert_eq!(body["questions"][1]["type"], "text");

    let sent = &stub.requests()[0];
    assert!(sent["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("Topic: Customer service"));
}

#[tokio::test]
async fn test_prompt_field_accepted_as_topic() {
    let reply = "1. How was your stay?\n2. Would you return?";
    let stub = spawn_stub(&[("m", Reply::Content(reply.to_string()))]).await;
    let (status, body) = send(
        app_for(&stub, &["m"]),
        Method::POST,
        "/api/survey",
        Some(json!({"prompt": "Hotel feedback", "language": "fr"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requested_count"], 2);
    assert_eq!(body["requested_language"], "fr");
    assert_eq!(body["questions"][0]["text"], "How was your stay?");
    assert_eq!(body["questions"][1]["language"], "fr");
}

#[tokio::test]
async fn test_empty_completion_returns_empty_survey() {
    let stub = spawn_stub(&[("m", Reply::Empty)]).await;
    let (status, body) = send(
        app_for(&stub, &["m"]),
        Method::POST,
        "/api/survey",
        Some(json!({"topic": "Anything"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"], json!([]));
    assert_eq!(body["requested_count"], 0);
}

#[tokio::test]
async fn test_missing_topic_is_bad_request() {
    let stub = spawn_stub(&[]).await;
    let (status, body) = send(
        app_for(&stub, &["m"]),
        Method::POST,
        "/api/survey",
        Some(json!({"language": "en"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_question_count_out_of_range() {
    let stub = spawn_stub(&[]).await;
    for count in [0, 51] {
        let (status, _) = send(
            app_for(&stub, &["m"]),
            Method::POST,
            "/api/survey",
            Some(json!({"topic": "Tea", "num_questions": count})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let stub = spawn_stub(&[]).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/survey")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app_for(&stub, &["m"]).oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_provider_rate_limit_is_429() {
    let stub = spawn_stub(&[("m", Reply::RateLimited(30))]).await;
    let (status, body) = send(
        app_for(&stub, &["m"]),
        Method::POST,
        "/api/survey",
        Some(json!({"topic": "Tea"})),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn test_provider_failure_is_502() {
    let stub = spawn_stub(&[("m", Reply::Status(500, "internal stack trace".to_string()))]).await;
    let (status, body) = send(
        app_for(&stub, &["m"]),
        Method::POST,
        "/api/survey",
        Some(json!({"topic": "Tea"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "GENERATION_FAILED");
    assert_eq!(body["error"]["message"], "Survey generation failed");
}

#[tokio::test]
async fn test_fallback_model_answers_request() {
    let stub = spawn_stub(&[
        ("first", Reply::Status(503, "overloaded".to_string())),
        ("second", Reply::Content(RADIO_REPLY.to_string())),
    ])
    .await;
    let (status, body) = send(
        app_for(&stub, &["first", "second"]),
        Method::POST,
        "/api/survey",
        Some(json!({"topic": "Tea"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "second");
    assert_eq!(stub.requested_models(), vec!["first", "second"]);
}

// ============================================================================
// POST /api/surveys/generate-from-prompt
// ============================================================================

#[tokio::test]
async fn test_generate_from_prompt_draft() {
    let stub = spawn_stub(&[("m", Reply::Content(RADIO_REPLY.to_string()))]).await;
    let (status, body) = send(
        app_for(&stub, &["m"]),
        Method::POST,
        "/api/surveys/generate-from-prompt",
        Some(json!({
            "prompt": "Public transport satisfaction",
            "survey_title": "Transit 2024",
            "languages": ["hi", "en"],
            "num_questions": 2
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Transit 2024");
    assert_eq!(body["description"], "");
    assert_eq!(body["survey"]["requested_language"], "hi");
    assert_eq!(body["survey"]["questions"][0]["language"], "hi");
    assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert!(chrono::DateTime::parse_from_rfc3339(body["created_at"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_generate_from_prompt_requires_title() {
    let stub = spawn_stub(&[]).await;
    let (status, body) = send(
        app_for(&stub, &["m"]),
        Method::POST,
        "/api/surveys/generate-from-prompt",
        Some(json!({"prompt": "Transit", "survey_title": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}
