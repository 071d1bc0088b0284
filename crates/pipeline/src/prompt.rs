//! Survey Prompt Builder
//!
//! Builds the system prompt and user message sent to the model for one
//! generation request.

use crate::model::{FeatureFlag, QuestionType, SurveyRequest};

/// Build the system prompt for survey generation.
pub fn build_survey_system_prompt() -> String {
    r#"You are a survey expert. Generate well-structured, diverse, and clear survey questions based on the provided topic.

Each question must be a JSON object with the following fields:
- "text": The question itself
- "type": One of "text", "radio", or "checkbox"
- "options": An array of answer choices (only for "radio" and "checkbox"; empty array otherwise)
- "language": The language code the question is written in

Respond with ONLY a valid JSON array of question objects. No markdown fences, no explanatory text."#
        .to_string()
}

/// Build the user message describing what to generate.
pub fn build_survey_user_message(request: &SurveyRequest) -> String {
    let type_names = QuestionType::ALL
        .iter()
        .map(|t| format!("'{}'", t.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut flag_lines = String::new();
    for flag in FeatureFlag::ALL {
        flag_lines.push_str(&format!(
            "- \"{}\": {}\n",
            flag.field_name(),
            request.flags.get(flag)
        ));
    }

    format!(
        "Topic: {topic}\n\
         Language: {language}\n\n\
         Generate {count} concise survey questions written in language '{language}', \
         in this exact JSON format:\n\
         [\n  \
         {{\"text\": \"Question 1?\", \"type\": \"text\", \"options\": [], \"language\": \"{language}\"}},\n  \
         {{\"text\": \"Question 2?\", \"type\": \"radio\", \"options\": [\"Yes\", \"No\"], \"language\": \"{language}\"}}\n\
         ]\n\n\
         Set these fields on every question:\n\
         {flags}\n\
         Rules:\n\
         - 'type' can only be {types}\n\
         - Include 'options' only if type is 'radio' or 'checkbox'\n\
         - Do NOT include any extra text outside the JSON",
        topic = request.topic.trim(),
        language = request.language,
        count = request.num_questions,
        flags = flag_lines,
        types = type_names,
    )
}
