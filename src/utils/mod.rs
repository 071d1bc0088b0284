//! Utilities
//!
//! Common utilities used throughout the server.

pub mod error;

pub use error::*;
