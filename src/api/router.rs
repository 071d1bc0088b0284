//! HTTP router.
//!
//! Routes:
//! - `GET /` and `GET /healthz` - liveness
//! - `POST /api/survey` - generate a survey from a topic
//! - `POST /api/surveys/generate-from-prompt` - generate a titled survey draft

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api::endpoints;
use crate::models::settings::AppConfig;
use crate::state::AppState;

/// Build the application router with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    Router::new()
        .route("/", get(endpoints::health::root))
        .route("/healthz", get(endpoints::health::check))
        .route("/api/survey", post(endpoints::surveys::generate))
        .route(
            "/api/surveys/generate-from-prompt",
            post(endpoints::surveys::generate_from_prompt),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured origins; `"*"` allows any origin.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
