//! Error Handling
//!
//! Unified error types for the server.
//! Uses thiserror for ergonomic error definitions.

use smart_survey_core::CoreError;
use smart_survey_llm::LlmError;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Errors from the shared core crate
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Model provider failures
    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
