//! Smart Survey Core
//!
//! Foundational error types and shared configuration types for the Smart
//! Survey workspace. This crate has no dependencies on application-level code
//! (HTTP server, LLM providers, pipeline).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `proxy` - Outbound proxy configuration shared by HTTP-using crates

pub mod error;
pub mod proxy;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
