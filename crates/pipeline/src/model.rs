//! Survey Data Model
//!
//! Canonical records (`Question`, `Survey`), the untrusted `QuestionCandidate`
//! recovered from model output, and the request-scoped inputs that drive the
//! pipeline (`SurveyRequest`, `RequestDefaults`, `FeatureFlags`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use smart_survey_core::{CoreError, CoreResult};

/// Free-form JSON object reserved for the audio and adaptive-logic collaborators.
pub type Metadata = Map<String, Value>;

/// Upper bound on questions per request.
pub const MAX_QUESTIONS: u32 = 50;

/// Default number of questions when the caller does not ask for a count.
pub const DEFAULT_QUESTION_COUNT: u32 = 5;

/// Default generation language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Answer widget a question is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Text,
    Radio,
    Checkbox,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::Text,
        QuestionType::Radio,
        QuestionType::Checkbox,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Radio => "radio",
            QuestionType::Checkbox => "checkbox",
        }
    }

    /// Case-insensitive lookup of a type name as a model might spell it.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(label))
    }

    /// Whether answers are picked from `options`.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::Radio | QuestionType::Checkbox)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-question feature toggles carried from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    Voice,
    Adaptive,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 2] = [FeatureFlag::Voice, FeatureFlag::Adaptive];

    /// Wire name of the flag on requests and question records.
    pub fn field_name(&self) -> &'static str {
        match self {
            FeatureFlag::Voice => "voice_enabled",
            FeatureFlag::Adaptive => "adaptive_enabled",
        }
    }
}

/// Request-level values for every `FeatureFlag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub voice_enabled: bool,
    pub adaptive_enabled: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            voice_enabled: false,
            adaptive_enabled: true,
        }
    }
}

impl FeatureFlags {
    pub fn get(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::Voice => self.voice_enabled,
            FeatureFlag::Adaptive => self.adaptive_enabled,
        }
    }
}

/// Values every question falls back to when the model left a field out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub language: String,
    pub flags: FeatureFlags,
}

impl RequestDefaults {
    pub fn new(language: impl Into<String>, flags: FeatureFlags) -> Self {
        Self {
            language: language.into(),
            flags,
        }
    }
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, FeatureFlags::default())
    }
}

/// A validated-on-demand generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRequest {
    pub topic: String,
    pub language: String,
    pub num_questions: u32,
    pub flags: FeatureFlags,
}

impl SurveyRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            num_questions: DEFAULT_QUESTION_COUNT,
            flags: FeatureFlags::default(),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.topic.trim().is_empty() {
            return Err(CoreError::validation("topic must not be empty"));
        }
        if self.language.trim().is_empty() {
            return Err(CoreError::validation("language must not be empty"));
        }
        if self.num_questions == 0 || self.num_questions > MAX_QUESTIONS {
            return Err(CoreError::validation(format!(
                "num_questions must be between 1 and {}, got {}",
                MAX_QUESTIONS, self.num_questions
            )));
        }
        Ok(())
    }

    pub fn defaults(&self) -> RequestDefaults {
        RequestDefaults::new(self.language.clone(), self.flags)
    }
}

/// Canonical question record. Every field is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub language: String,
    pub ai_generated: bool,
    pub voice_enabled: bool,
    pub audio_metadata: Metadata,
    pub adaptive_enabled: bool,
    pub adaptive_config: Metadata,
}


/// Unvalidated question as recovered from model output.
///
/// Each field holds whatever JSON the model produced for it; `None` means the
/// key was missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_generated: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_enabled: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptive_enabled: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptive_config: Option<Value>,
}

/// Alternate keys some prompts coax out of the model for the question text.
const TEXT_ALIASES: [&str; 2] = ["question_text", "question"];

fn take_non_null(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.remove(key).filter(|v| !v.is_null())
}

impl QuestionCandidate {
    /// Build a candidate from one decoded JSON object, renaming alternate
    /// text keys to `text`. Unknown keys are dropped.
    pub fn from_object(mut map: Map<String, Value>) -> Self {
        let text = take_non_null(&mut map, "text").or_else(|| {
            TEXT_ALIASES
                .iter()
                .find_map(|alias| take_non_null(&mut map, alias))
        });

        Self {
            text,
            question_type: take_non_null(&mut map, "type"),
            options: take_non_null(&mut map, "options"),
            language: take_non_null(&mut map, "language"),
            ai_generated: take_non_null(&mut map, "ai_generated"),
            voice_enabled: take_non_null(&mut map, "voice_enabled"),
            adaptive_enabled: take_non_null(&mut map, "adaptive_enabled"),
            audio_metadata: take_non_null(&mut map, "audio_metadata"),
            adaptive_config: take_non_null(&mut map, "adaptive_config"),
        }
    }

    /// The raw value the model gave for a feature flag.
    pub fn flag(&self, flag: FeatureFlag) -> Option<&Value> {
        match flag {
            FeatureFlag::Voice => self.voice_enabled.as_ref(),
            FeatureFlag::Adaptive => self.adaptive_enabled.as_ref(),
        }
    }
}

impl From<Question> for QuestionCandidate {
    fn from(q: Question) -> Self {
        Self {
            text: Some(Value::String(q.text)),
            question_type: Some(Value::String(q.question_type.as_str().to_string())),
            options: Some(Value::Array(
                q.options.into_iter().map(Value::String).collect(),
            )),
            language: Some(Value::String(q.language)),
            ai_generated: Some(Value::Bool(q.ai_generated)),
            voice_enabled: Some(Value::Bool(q.voice_enabled)),
            adaptive_enabled: Some(Value::Bool(q.adaptive_enabled)),
            audio_metadata: Some(Value::Object(q.audio_metadata)),
            adaptive_config: Some(Value::Object(q.adaptive_config)),
        }
    }
}

/// The envelope handed back to the caller for one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub questions: Vec<Question>,
    pub requested_language: String,
    /// Number of questions actually produced.
    pub requested_count: usize,
}

impl Survey {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
