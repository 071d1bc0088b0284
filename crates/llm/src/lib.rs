//! Smart Survey LLM
//!
//! Provides a single interface for talking to chat-completion providers:
//! - OpenAI (api.openai.com)
//! - Any OpenAI-compatible server (vLLM, LM Studio, Ollama `/v1`)
//!
//! Also includes the model fallback chain and the HTTP client factory.

pub mod fallback;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use fallback::FallbackProvider;
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::LlmProvider;
pub use types::*;
