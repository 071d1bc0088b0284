//! Liveness endpoints.

use axum::extract::State;
use axum::Json;

use crate::models::response::{HealthResponse, StatusResponse};
use crate::state::AppState;

/// `GET /`
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse::default())
}

/// `GET /healthz` - reports the primary provider and model without calling it.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider = state.provider();
    Json(HealthResponse::ok(provider.name(), provider.model()))
}
