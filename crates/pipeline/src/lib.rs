//! Smart Survey Pipeline
//!
//! Turns free-form model output into canonical survey questions:
//!
//! - `prompt` - instructions sent to the model
//! - `parser` - structured decoding with line-mode recovery
//! - `normalizer` - fixed-shape `Question` records with defaulted fields
//! - `assembler` - the `Survey` envelope
//!
//! Everything here is pure; the provider call lives in the server crate.

pub mod assembler;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod prompt;

pub use assembler::assemble_survey;
pub use model::{
    FeatureFlag, FeatureFlags, Metadata, Question, QuestionCandidate, QuestionType,
    RequestDefaults, Survey, SurveyRequest, DEFAULT_LANGUAGE, DEFAULT_QUESTION_COUNT,
    MAX_QUESTIONS,
};
pub use normalizer::{normalize_question, normalize_questions, MISSING_TEXT_PLACEHOLDER};
pub use parser::{parse_response, ParseMode, ParsedResponse};
pub use prompt::{build_survey_system_prompt, build_survey_user_message};

/// Run raw model text through parse, normalize and assemble.
pub fn build_survey(raw: &str, defaults: &RequestDefaults) -> Survey {
    let parsed = parse_response(raw, defaults);
    tracing::debug!(mode = ?parsed.mode, candidates = parsed.len(), "parsed model output");
    let questions = normalize_questions(parsed.candidates, defaults);
    assemble_survey(questions, &defaults.language)
}
