//! Survey Assembler

use crate::model::{Question, Survey};

/// Wrap normalized questions in the response envelope.
///
/// `requested_count` records how many questions were actually produced,
/// which may differ from the count the caller asked the model for.
pub fn assemble_survey(questions: Vec<Question>, language: &str) -> Survey {
    Survey {
        requested_count: questions.len(),
        requested_language: language.to_string(),
        questions,
    }
}
