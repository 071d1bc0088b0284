//! Response Types
//!
//! Status bodies returned by the service endpoints.

use serde::{Deserialize, Serialize};

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl Default for StatusResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Smart Survey API is running".to_string(),
        }
    }
}

/// Body of `GET /healthz`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub model: String,
}

impl HealthResponse {
    pub fn ok(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            provider: provider.into(),
            model: model.into(),
        }
    }
}
