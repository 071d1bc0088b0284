//! Survey Payloads
//!
//! Request and response bodies for the survey generation endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use smart_survey_core::{CoreError, CoreResult};
use smart_survey_pipeline::{
    FeatureFlags, Survey, SurveyRequest, DEFAULT_LANGUAGE, DEFAULT_QUESTION_COUNT,
};

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_languages() -> Vec<String> {
    vec![default_language()]
}

fn default_num_questions() -> u32 {
    DEFAULT_QUESTION_COUNT
}

fn default_adaptive_enabled() -> bool {
    FeatureFlags::default().adaptive_enabled
}

/// First non-blank value, trimmed.
fn first_non_blank<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    values
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Body of `POST /api/survey`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSurveyRequest {
    #[serde(default)]
    pub topic: Option<String>,
    /// Accepted as an alias for `topic`
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,
    #[serde(default)]
    pub voice_enabled: bool,
    #[serde(default = "default_adaptive_enabled")]
    pub adaptive_enabled: bool,
}

impl GenerateSurveyRequest {
    /// Resolve the topic (`topic` wins over `prompt`) and validate.
    pub fn into_survey_request(self) -> CoreResult<SurveyRequest> {
        let topic = first_non_blank([self.topic.as_deref(), self.prompt.as_deref()])
            .ok_or_else(|| CoreError::validation("topic or prompt is required"))?;

        let request = SurveyRequest {
            topic,
            language: self.language.trim().to_string(),
            num_questions: self.num_questions,
            flags: FeatureFlags {
                voice_enabled: self.voice_enabled,
                adaptive_enabled: self.adaptive_enabled,
            },
        };
        request.validate()?;
        Ok(request)
    }
}

/// Body of `POST /api/surveys/generate-from-prompt`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateFromPromptRequest {
    pub prompt: String,
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,
    pub survey_title: String,
    #[serde(default)]
    pub survey_description: String,
    /// The first entry is the generation language
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub voice_enabled: bool,
    #[serde(default = "default_adaptive_enabled")]
    pub adaptive_enabled: bool,
}

impl GenerateFromPromptRequest {
    pub fn validate_title(&self) -> CoreResult<()> {
        if self.survey_title.trim().is_empty() {
            return Err(CoreError::validation("survey_title must not be empty"));
        }
        Ok(())
    }

    /// Build the pipeline request from the prompt and the primary language.
    pub fn to_survey_request(&self) -> CoreResult<SurveyRequest> {
        self.validate_title()?;

        let language = first_non_blank(self.languages.iter().map(|l| Some(l.as_str())))
            .unwrap_or_else(default_language);

        let request = SurveyRequest {
            topic: self.prompt.trim().to_string(),
            language,
            num_questions: self.num_questions,
            flags: FeatureFlags {
                voice_enabled: self.voice_enabled,
                adaptive_enabled: self.adaptive_enabled,
            },
        };
        request.validate()?;
        Ok(request)
    }
}

/// Response of `POST /api/survey`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSurveyResponse {
    #[serde(flatten)]
    pub survey: Survey,
    /// Model that produced the questions
    pub model: String,
}

/// Response of `POST /api/surveys/generate-from-prompt`. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyDraft {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub survey: Survey,
}

impl SurveyDraft {
    pub fn new(title: &str, description: &str, survey: Survey) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
            survey,
        }
    }
}
