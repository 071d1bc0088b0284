//! Shared helpers: a local chat-completions stub server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// What the stub answers for a given model.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with this assistant message content
    Content(String),
    /// 200 with a null message content
    Empty,
    /// Arbitrary status with a plain-text body
    Status(u16, String),
    /// 429 with a `Retry-After` header
    RateLimited(u32),
}

#[derive(Default)]
struct StubState {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<Value>>,
    auth_headers: Mutex<Vec<Option<String>>>,
}

/// Running stub server. The task lives until the test runtime shuts down.
pub struct StubServer {
    pub chat_url: String,
    state: Arc<StubState>,
}

impl StubServer {
    /// Request bodies received so far, in order.
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Models requested so far, in order.
    pub fn requested_models(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r["model"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.state.auth_headers.lock().unwrap().clone()
    }
}

/// Start a stub on an ephemeral localhost port. Unknown models get a 404.
pub async fn spawn_stub(replies: &[(&str, Reply)]) -> StubServer {
    let state = Arc::new(StubState {
        replies: replies
            .iter()
            .map(|(model, reply)| (model.to_string(), reply.clone()))
            .collect(),
        ..Default::default()
    });

    let app = Router::new()
        .route("/v1/chat/completions", post(chat))
        .route("/v1/models", get(models))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer {
        chat_url: format!("http://{}/v1/chat/completions", addr),
        state,
    }
}

async fn models() -> Json<Value> {
    Json(json!({"object": "list", "data": []}))
}

async fn chat(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.auth_headers.lock().unwrap().push(auth);
    state.requests.lock().unwrap().push(body.clone());

    let model = body["model"].as_str().unwrap_or_default().to_string();
    match state.replies.get(&model) {
        Some(Reply::Content(text)) => Json(completion(&model, json!(text))).into_response(),
        Some(Reply::Empty) => Json(completion(&model, Value::Null)).into_response(),
        Some(Reply::Status(code, message)) => {
            (StatusCode::from_u16(*code).unwrap(), message.clone()).into_response()
        }
        Some(Reply::RateLimited(secs)) => (
            StatusCode::TOO_MANY_REQUESTS,
            [("retry-after", secs.to_string())],
            "rate limit reached",
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, format!("model {} not found", model)).into_response(),
    }
}

fn completion(model: &str, content: Value) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 42, "completion_tokens": 17, "total_tokens": 59}
    })
}
