//! Services
//!
//! Business logic behind the HTTP endpoints.

pub mod generation;

pub use generation::{generate_survey, GeneratedSurvey};
