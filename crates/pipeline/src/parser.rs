//! Response Parser
//!
//! Decodes raw model text into question candidates. A JSON array (optionally
//! wrapped in one Markdown code fence) is decoded element by element; anything
//! else goes through line-mode recovery, where each non-blank line becomes one
//! text question.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::model::{FeatureFlag, QuestionCandidate, QuestionType, RequestDefaults};

/// Which strategy produced the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// The text decoded as a JSON array.
    Structured,
    /// The text was split into lines.
    LineRecovery,
}

/// Candidates recovered from one model response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub candidates: Vec<QuestionCandidate>,
    pub mode: ParseMode,
}

impl ParsedResponse {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Parse raw model text into an ordered list of candidates.
///
/// Never fails: text that yields nothing produces zero candidates.
pub fn parse_response(raw: &str, defaults: &RequestDefaults) -> ParsedResponse {
    let body = strip_code_fence(raw);

    if let Some(candidates) = decode_json_array(body) {
        debug!(count = candidates.len(), "decoded structured model output");
        return ParsedResponse {
            candidates,
            mode: ParseMode::Structured,
        };
    }

    let candidates = recover_lines(body, defaults);
    debug!(count = candidates.len(), "recovered questions from plain lines");
    ParsedResponse {
        candidates,
        mode: ParseMode::LineRecovery,
    }
}

/// Remove one Markdown code fence surrounding the whole text, including an
/// info string such as `json` on the opening line.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };

    match inner.find('\n') {
        Some(nl) => inner[nl + 1..].trim(),
        None => strip_inline_info(inner).trim(),
    }
}

/// Drop an info token glued to a single-line payload, as in ```` ```json[...]``` ````.
fn strip_inline_info(inner: &str) -> &str {
    let rest = inner.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    if rest.len() < inner.len() && rest.trim_start().starts_with(['[', '{']) {
        rest
    } else {
        inner
    }
}

/// Decode `text` as a JSON array. Returns `None` for malformed JSON and for
/// JSON that is not an array.
fn decode_json_array(text: &str) -> Option<Vec<QuestionCandidate>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => QuestionCandidate::from_object(map),
                    _ => QuestionCandidate::default(),
                })
                .collect(),
        ),
        _ => None,
    }
}

static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("ordinal pattern is valid"));

/// Strip a leading `"<digits>."` ordinal and the whitespace after it.
fn strip_ordinal(line: &str) -> &str {
    match ORDINAL_PREFIX.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

fn recover_lines(text: &str, defaults: &RequestDefaults) -> Vec<QuestionCandidate> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line_candidate(strip_ordinal(line), defaults))
        .collect()
}

fn line_candidate(text: &str, defaults: &RequestDefaults) -> QuestionCandidate {
    QuestionCandidate {
        text: Some(Value::String(text.to_string())),
        question_type: Some(Value::String(QuestionType::Text.as_str().to_string())),
        options: Some(Value::Array(Vec::new())),
        language: Some(Value::String(defaults.language.clone())),
        voice_enabled: Some(Value::Bool(defaults.flags.get(FeatureFlag::Voice))),
        adaptive_enabled: Some(Value::Bool(defaults.flags.get(FeatureFlag::Adaptive))),
        ..Default::default()
    }
}
