//! Survey Generation Service
//!
//! One provider call per request, followed by the pure pipeline:
//! prompt -> model -> parse -> normalize -> assemble.

use std::sync::Arc;

use tracing::{debug, info, warn};

use smart_survey_llm::{LlmProvider, LlmRequestOptions, LlmResult, Message};
use smart_survey_pipeline::{
    build_survey, build_survey_system_prompt, build_survey_user_message, Survey, SurveyRequest,
};

/// A survey together with the model that produced it.
#[derive(Debug, Clone)]
pub struct GeneratedSurvey {
    pub survey: Survey,
    pub model: String,
}

/// Generate a survey for an already-validated request.
///
/// Provider failures are returned unchanged; an empty or unusable completion
/// yields an empty survey rather than an error.
pub async fn generate_survey(
    provider: Arc<dyn LlmProvider>,
    request: &SurveyRequest,
) -> LlmResult<GeneratedSurvey> {
    let system_prompt = build_survey_system_prompt();
    let user_message = build_survey_user_message(request);

    info!(
        topic = %request.topic,
        language = %request.language,
        num_questions = request.num_questions,
        "generating survey"
    );

    let response = provider
        .send_message(
            vec![Message::user(user_message)],
            Some(system_prompt),
            LlmRequestOptions::default(),
        )
        .await?;

    if response.is_truncated() {
        warn!(model = %response.model, "completion hit the token limit");
    }

    let response_text = response.text();
    debug!(
        len = response_text.len(),
        preview = %response_text.chars().take(300).collect::<String>(),
        "survey generation response"
    );

    let survey = build_survey(response_text, &request.defaults());

    if survey.requested_count != request.num_questions as usize {
        debug!(
            requested = request.num_questions,
            produced = survey.requested_count,
            "model returned a different number of questions"
        );
    }
    info!(
        model = %response.model,
        questions = survey.requested_count,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "survey generated"
    );

    Ok(GeneratedSurvey {
        survey,
        model: response.model,
    })
}
