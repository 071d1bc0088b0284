//! Survey generation endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::error::ApiError;
use crate::models::survey::{
    GenerateFromPromptRequest, GenerateSurveyRequest, GeneratedSurveyResponse, SurveyDraft,
};
use crate::services::generation::generate_survey;
use crate::state::AppState;

/// `POST /api/survey` - generate questions for a topic.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateSurveyRequest>, JsonRejection>,
) -> Result<Json<GeneratedSurveyResponse>, ApiError> {
    let Json(body) = payload?;
    let request = body.into_survey_request()?;

    let generated = generate_survey(state.provider().clone(), &request).await?;

    Ok(Json(GeneratedSurveyResponse {
        survey: generated.survey,
        model: generated.model,
    }))
}

/// `POST /api/surveys/generate-from-prompt` - generate a titled draft.
///
/// The draft gets a fresh id and timestamp but is not stored.
pub async fn generate_from_prompt(
    State(state): State<AppState>,
    payload: Result<Json<GenerateFromPromptRequest>, JsonRejection>,
) -> Result<Json<SurveyDraft>, ApiError> {
    let Json(body) = payload?;
    let request = body.to_survey_request()?;

    let generated = generate_survey(state.provider().clone(), &request).await?;
    let draft = SurveyDraft::new(&body.survey_title, &body.survey_description, generated.survey);

    info!(id = %draft.id, title = %draft.title, model = %generated.model, "survey draft created");
    Ok(Json(draft))
}
