//! Storage Layer
//!
//! Loads the JSON configuration file and environment overrides.

pub mod config;

pub use config::*;
