//! Application State
//!
//! Shared, read-only state handed to every request handler.

use std::sync::Arc;

use smart_survey_llm::{FallbackProvider, LlmProvider};

use crate::models::settings::AppConfig;
use crate::utils::error::{AppError, AppResult};

/// Application state shared by the axum handlers
#[derive(Clone)]
pub struct AppState {
    /// Model provider (normally the fallback chain)
    provider: Arc<dyn LlmProvider>,
    /// Validated server configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Build the fallback chain described by `config`.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let models = config.model_chain();
        if models.is_empty() {
            return Err(AppError::config("no models configured"));
        }
        let provider = FallbackProvider::from_models(&config.provider_config(), &models)?;
        Ok(Self::new(Arc::new(provider), config))
    }

    /// Use an already-built provider.
    pub fn new(provider: Arc<dyn LlmProvider>, config: AppConfig) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provider", &self.provider.name())
            .field("model", &self.provider.model())
            .finish()
    }
}
