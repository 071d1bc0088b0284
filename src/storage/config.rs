//! JSON Configuration Management
//!
//! Builds the server configuration from defaults, an optional JSON file and
//! environment overrides (including a `.env` file in the working directory).

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};

/// Environment variable naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "SMART_SURVEY_CONFIG";

/// Configuration service holding the merged server settings
#[derive(Debug)]
pub struct ConfigService {
    env_file: Option<PathBuf>,
    config_path: Option<PathBuf>,
    config: AppConfig,
}

impl ConfigService {
    /// Load `.env`, then build the configuration from the process environment.
    pub fn load() -> AppResult<Self> {
        let env_file = match dotenvy::dotenv() {
            Ok(path) => Some(path),
            Err(e) if e.not_found() => None,
            Err(e) => return Err(AppError::config(format!("failed to read .env: {}", e))),
        };
        let mut service = Self::load_with(|key| std::env::var(key).ok())?;
        service.env_file = env_file;
        Ok(service)
    }

    /// Build the configuration using `env` to look up variables.
    pub fn load_with<F>(env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = env(CONFIG_PATH_ENV)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let mut config = match &config_path {
            Some(path) => Self::load_from_file(path)?,
            None => AppConfig::default(),
        };
        config.apply_update(env_overrides(env));
        config.validate().map_err(AppError::config)?;

        Ok(Self {
            env_file: None,
            config_path,
            config,
        })
    }

    /// Load configuration from a file. Validation happens after overrides.
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// The `.env` file `load` read, if one was found
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Path of the JSON file the configuration was read from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collect environment overrides into a partial update.
///
/// `SMART_SURVEY_BIND` wins over `PORT`; empty variables are ignored.
pub fn env_overrides<F>(env: F) -> SettingsUpdate
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let bind_address = var("SMART_SURVEY_BIND")
        .or_else(|| var("PORT").map(|port| format!("0.0.0.0:{}", port)));

    SettingsUpdate {
        bind_address,
        api_key: var("OPENAI_API_KEY"),
        base_url: var("OPENAI_BASE_URL"),
        models: var("SMART_SURVEY_MODELS")
            .map(|v| split_list(&v))
            .filter(|models| !models.is_empty()),
        allowed_origins: var("SMART_SURVEY_ALLOWED_ORIGINS")
            .map(|v| split_list(&v))
            .filter(|origins| !origins.is_empty()),
    }
}
