//! Smart Survey - Rust Backend Library
//!
//! HTTP backend that asks a language model for survey questions and
//! normalizes whatever comes back into canonical question records.
//! It includes:
//! - axum router and endpoint handlers
//! - Survey generation service (provider call + normalization pipeline)
//! - Configuration loading (JSON file + environment)
//! - Data models and utilities

pub mod api;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use api::build_router;
pub use models::response::*;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use state::AppState;
pub use storage::ConfigService;
pub use utils::error::{AppError, AppResult};
