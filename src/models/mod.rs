//! Data Models
//!
//! Configuration, HTTP payloads and response types.

pub mod response;
pub mod settings;
pub mod survey;

pub use response::*;
pub use settings::*;
pub use survey::*;
