//! Settings Models
//!
//! Server configuration and the partial update applied from the environment.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use smart_survey_core::ProxyConfig;
use smart_survey_llm::{ProviderConfig, ProviderType};

/// Models tried in order when the previous one fails.
pub const DEFAULT_MODELS: [&str; 3] = ["gpt-4o-mini", "gpt-4.1-mini", "gpt-4.1-nano"];

/// Server configuration loaded from the optional JSON config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to
    pub bind_address: String,
    /// Provider protocol flavor
    pub provider: ProviderType,
    /// API key; read from file or environment, never written back
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Full chat-completions URL override
    pub base_url: Option<String>,
    /// Model fallback chain, first entry tried first
    pub models: Vec<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token limit
    pub max_tokens: u32,
    /// Whole-request timeout for provider calls, in seconds
    pub request_timeout_secs: u64,
    /// CORS origins; `"*"` allows any origin
    pub allowed_origins: Vec<String>,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Outbound proxy for provider calls
    pub proxy: Option<ProxyConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            provider: ProviderType::OpenAI,
            api_key: None,
            base_url: None,
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            temperature: 0.7,
            max_tokens: 1000,
            request_timeout_secs: 60,
            allowed_origins: vec!["http://localhost:5173".to_string()],
            log_filter: "smart_survey=info,tower_http=info".to_string(),
            proxy: None,
        }
    }
}

/// Partial configuration update (environment overrides)
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub bind_address: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub models: Option<Vec<String>>,
    pub allowed_origins: Option<Vec<String>>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(bind_address) = update.bind_address {
            self.bind_address = bind_address;
        }
        if let Some(api_key) = update.api_key {
            self.api_key = Some(api_key);
        }
        if let Some(base_url) = update.base_url {
            self.base_url = Some(base_url);
        }
        if let Some(models) = update.models {
            self.models = models;
        }
        if let Some(origins) = update.allowed_origins {
            self.allowed_origins = origins;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.models.iter().all(|m| m.trim().is_empty()) {
            return Err("models must list at least one model".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Invalid temperature: {}. Must be between 0.0 and 2.0",
                self.temperature
            ));
        }

        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }

        self.socket_addr()?;

        if self.provider.requires_api_key() && !self.has_api_key() {
            return Err(format!(
                "provider '{}' requires an API key (set OPENAI_API_KEY)",
                self.provider
            ));
        }

        if let Some(proxy) = &self.proxy {
            proxy.validate().map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    /// Parse `bind_address`.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.bind_address
            .parse()
            .map_err(|e| format!("Invalid bind_address '{}': {}", self.bind_address, e))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Non-blank model names in chain order.
    pub fn model_chain(&self) -> Vec<String> {
        self.models
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Provider settings shared by every model in the chain.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider,
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model_chain().into_iter().next().unwrap_or_default(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            request_timeout_secs: self.request_timeout_secs,
            proxy: self.proxy.clone(),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o.trim() == "*")
    }
}
