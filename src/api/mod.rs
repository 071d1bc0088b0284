//! HTTP API
//!
//! axum router, endpoint handlers and the JSON error envelope.

pub mod endpoints;
pub mod error;
pub mod router;

pub use error::ApiError;
pub use router::build_router;
