//! Question Normalizer
//!
//! Converts candidates into canonical `Question` records. Every field is
//! resolved independently: a usable value from the candidate wins, anything
//! else falls back to the request defaults. Output is 1:1 with input and keeps
//! its order.

use serde_json::Value;
use tracing::warn;

use crate::model::{
    FeatureFlag, Metadata, Question, QuestionCandidate, QuestionType, RequestDefaults,
};

/// Text used when a candidate carries no usable question text.
pub const MISSING_TEXT_PLACEHOLDER: &str = "[missing question text]";

/// Normalize every candidate, preserving order.
pub fn normalize_questions(
    candidates: Vec<QuestionCandidate>,
    defaults: &RequestDefaults,
) -> Vec<Question> {
    candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| normalize_question(candidate, index, defaults))
        .collect()
}

/// Normalize a single candidate. `index` is only used for diagnostics.
pub fn normalize_question(
    candidate: QuestionCandidate,
    index: usize,
    defaults: &RequestDefaults,
) -> Question {
    let text = resolve_text(candidate.text.as_ref()).unwrap_or_else(|| {
        warn!(index, "candidate has no usable question text; using placeholder");
        MISSING_TEXT_PLACEHOLDER.to_string()
    });

    Question {
        text,
        question_type: resolve_type(candidate.question_type.as_ref()),
        options: resolve_options(candidate.options.as_ref()),
        language: resolve_language(candidate.language.as_ref(), &defaults.language),
        ai_generated: true,
        voice_enabled: resolve_flag(&candidate, FeatureFlag::Voice, defaults),
        adaptive_enabled: resolve_flag(&candidate, FeatureFlag::Adaptive, defaults),
        audio_metadata: resolve_metadata(candidate.audio_metadata),
        adaptive_config: resolve_metadata(candidate.adaptive_config),
    }
}

/// Scalar JSON rendered as text; `None` for null and structured values.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn resolve_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(scalar_text)
        .filter(|text| !text.trim().is_empty())
}

fn resolve_type(value: Option<&Value>) -> QuestionType {
    value
        .and_then(Value::as_str)
        .and_then(QuestionType::from_label)
        .unwrap_or_default()
}

fn resolve_options(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    }
}

fn resolve_language(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .filter(|lang| !lang.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn resolve_flag(
    candidate: &QuestionCandidate,
    flag: FeatureFlag,
    defaults: &RequestDefaults,
) -> bool {
    candidate
        .flag(flag)
        .and_then(Value::as_bool)
        .unwrap_or_else(|| defaults.flags.get(flag))
}

fn resolve_metadata(value: Option<Value>) -> Metadata {
    match value {
        Some(Value::Object(map)) => map,
        _ => Metadata::new(),
    }
}
