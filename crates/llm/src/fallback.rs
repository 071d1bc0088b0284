//! Model Fallback Chain
//!
//! Wraps an ordered list of providers (usually one per model on the same
//! endpoint) and returns the first successful completion. Failures are logged
//! and the next provider is tried; when every provider fails the last error is
//! returned unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::openai::OpenAIProvider;
use crate::provider::LlmProvider;
use crate::types::{
    LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig,
};

impl LlmError {
    /// Whether the next model in a chain could plausibly succeed.
    ///
    /// Credentials are shared across the chain, so an authentication failure
    /// ends it immediately.
    pub fn should_fallback(&self) -> bool {
        !matches!(self, LlmError::AuthenticationFailed { .. })
    }
}

/// Provider that tries a chain of providers in order.
pub struct FallbackProvider {
    chain: Vec<Arc<dyn LlmProvider>>,
}

impl std::fmt::Debug for FallbackProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackProvider")
            .field("models", &self.models())
            .finish()
    }
}

impl FallbackProvider {
    /// Create a chain from pre-built providers. The chain must not be empty.
    pub fn new(chain: Vec<Arc<dyn LlmProvider>>) -> LlmResult<Self> {
        if chain.is_empty() {
            return Err(LlmError::ProviderUnavailable {
                message: "fallback chain has no providers".to_string(),
            });
        }
        Ok(Self { chain })
    }

    /// Build one OpenAI-protocol provider per model, all sharing `base`.
    pub fn from_models(base: &ProviderConfig, models: &[String]) -> LlmResult<Self> {
        let chain = models
            .iter()
            .map(|model| {
                let config = ProviderConfig {
                    model: model.clone(),
                    ..base.clone()
                };
                OpenAIProvider::new(config).map(|p| Arc::new(p) as Arc<dyn LlmProvider>)
            })
            .collect::<LlmResult<Vec<_>>>()?;
        Self::new(chain)
    }

    /// Model names in chain order.
    pub fn models(&self) -> Vec<&str> {
        self.chain.iter().map(|p| p.model()).collect()
    }

    fn primary(&self) -> &Arc<dyn LlmProvider> {
        &self.chain[0]
    }
}

#[async_trait]
impl LlmProvider for FallbackProvider {
    fn name(&self) -> &'static str {
        self.primary().name()
    }

    fn model(&self) -> &str {
        self.primary().model()
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let mut last_error = None;

        for (attempt, provider) in self.chain.iter().enumerate() {
            match provider
                .send_message(messages.clone(), system.clone(), request_options.clone())
                .await
            {
                Ok(response) => {
                    if attempt > 0 {
                        info!(model = provider.model(), attempt, "fallback model answered");
                    }
                    return Ok(response);
                }
                Err(err) => {
                    warn!(model = provider.model(), attempt, error = %err, "model failed");
                    let stop = !err.should_fallback();
                    last_error = Some(err);
                    if stop {
                        break;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::ProviderUnavailable {
            message: "fallback chain has no providers".to_string(),
        }))
    }

    async fn health_check(&self) -> LlmResult<()> {
        self.primary().health_check().await
    }

    fn config(&self) -> &ProviderConfig {
        self.primary().config()
    }
}
