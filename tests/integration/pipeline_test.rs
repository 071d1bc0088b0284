//! Pipeline Integration Tests
//!
//! Drives raw model text through parse, normalize and assemble:
//! - Structured JSON replies (bare and fenced)
//! - Line-mode recovery for numbered lists and non-array JSON
//! - Field defaulting, boolean strictness and idempotency
//! - Empty replies

use serde_json::{json, Value};
use smart_survey_pipeline::{
    build_survey, normalize_question, normalize_questions, parse_response, FeatureFlags,
    ParseMode, Question, QuestionCandidate, QuestionType, RequestDefaults, MISSING_TEXT_PLACEHOLDER,
};

fn english_defaults() -> RequestDefaults {
    RequestDefaults::new(
        "en",
        FeatureFlags {
            voice_enabled: false,
            adaptive_enabled: true,
        },
    )
}

// ============================================================================
// Structured replies
// ============================================================================

#[test]
fn test_json_happy_path() {
    let raw = r#"[{"text":"Rate our service","type":"radio","options":["Good","Bad"]}]"#;
    let survey = build_survey(raw, &english_defaults());

    assert_eq!(survey.requested_count, 1);
    assert_eq!(survey.requested_language, "en");
    let q = &survey.questions[0];
    assert_eq!(q.text, "Rate our service");
    assert_eq!(q.question_type, QuestionType::Radio);
    assert_eq!(q.options, vec!["Good", "Bad"]);
    assert!(q.ai_generated);
    assert!(!q.voice_enabled);
    assert!(q.adaptive_enabled);
}

#[test]
fn test_fenced_reply_matches_bare_reply() {
    let bare = r#"[{"text":"How often do you travel?","type":"text"}]"#;
    let fenced = format!("```json\n{}\n```", bare);

    assert_eq!(
        build_survey(bare, &english_defaults()),
        build_survey(&fenced, &english_defaults())
    );
}

#[test]
fn test_question_text_alias_renamed() {
    let raw = r#"[{"question_text":"Which city?","type":"checkbox","options":["Pune","Delhi"]}]"#;
    let survey = build_survey(raw, &english_defaults());
    assert_eq!(survey.questions[0].text, "Which city?");
    assert_eq!(survey.questions[0].question_type, QuestionType::Checkbox);
}

#[test]
fn test_partially_shaped_objects_defaulted() {
    let raw = r#"[
        {"text": "Q1", "type": "dropdown", "options": "a,b"},
        {"type": "radio"},
        {"text": "Q3", "voice_enabled": "true", "language": "mr", "audio_metadata": {"rate": 16000}}
    ]"#;
    let survey = build_survey(raw, &english_defaults());
    assert_eq!(survey.requested_count, 3);

    assert_eq!(survey.questions[0].question_type, QuestionType::Text);
    assert!(survey.questions[0].options.is_empty());

    assert_eq!(survey.questions[1].text, MISSING_TEXT_PLACEHOLDER);
    assert_eq!(survey.questions[1].question_type, QuestionType::Radio);

    assert!(!survey.questions[2].voice_enabled);
    assert_eq!(survey.questions[2].language, "mr");
    assert_eq!(survey.questions[2].audio_metadata["rate"], json!(16000));
}

// ============================================================================
// Line-mode recovery
// ============================================================================

#[test]
fn test_numbered_list_recovered() {
    let raw = "1. What is your age?\n\n2. What is your city?";
    let parsed = parse_response(raw, &english_defaults());
    assert_eq!(parsed.mode, ParseMode::LineRecovery);

    let questions = normalize_questions(parsed.candidates, &english_defaults());
    let texts: Vec<_> = questions.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(texts, vec!["What is your age?", "What is your city?"]);
    for q in &questions {
        assert_eq!(q.question_type, QuestionType::Text);
        assert!(q.options.is_empty());
        assert_eq!(q.language, "en");
        assert!(!q.voice_enabled);
        assert!(q.adaptive_enabled);
    }
}

#[test]
fn test_recovered_lines_carry_request_flags() {
    let defaults = RequestDefaults::new(
        "ta",
        FeatureFlags {
            voice_enabled: true,
            adaptive_enabled: false,
        },
    );
    let survey = build_survey("Describe your commute.", &defaults);
    assert_eq!(survey.requested_language, "ta");
    assert!(survey.questions[0].voice_enabled);
    assert!(!survey.questions[0].adaptive_enabled);
    assert_eq!(survey.questions[0].language, "ta");
}

#[test]
fn test_single_object_goes_through_line_mode() {
    let raw = r#"{"text":"oops"}"#;
    let parsed = parse_response(raw, &english_defaults());
    assert_eq!(parsed.mode, ParseMode::LineRecovery);

    let survey = build_survey(raw, &english_defaults());
    assert_eq!(survey.requested_count, 1);
    assert_eq!(survey.questions[0].text, raw);
}

#[test]
fn test_empty_reply_is_empty_survey() {
    let survey = build_survey("", &english_defaults());
    assert!(survey.is_empty());
    assert_eq!(survey.requested_count, 0);
    assert_eq!(survey.requested_language, "en");
}

// ============================================================================
// Normalizer properties
// ============================================================================

#[test]
fn test_empty_object_has_all_fields() {
    let question = normalize_question(QuestionCandidate::default(), 0, &english_defaults());
    let value = serde_json::to_value(&question).unwrap();
    let object = value.as_object().unwrap();

    for field in [
        "text",
        "type",
        "options",
        "language",
        "ai_generated",
        "voice_enabled",
        "audio_metadata",
        "adaptive_enabled",
        "adaptive_config",
    ] {
        assert!(object.contains_key(field), "missing field {}", field);
    }
}

#[test]
fn test_normalizing_canonical_questions_is_identity() {
    let raw = r#"[
        {"text": "Pick toppings", "type": "Checkbox", "options": ["cheese", 3, null]},
        {"text": "Any comments?", "adaptive_config": {"follow_up": true}},
        {}
    ]"#;
    let first = build_survey(raw, &english_defaults());

    let candidates: Vec<QuestionCandidate> = first
        .questions
        .iter()
        .cloned()
        .map(QuestionCandidate::from)
        .collect();
    let second: Vec<Question> = normalize_questions(candidates, &english_defaults());

    assert_eq!(first.questions, second);
}

#[test]
fn test_order_preserved_for_many_candidates() {
    let items: Vec<Value> = (1..=20).map(|i| json!({"text": format!("Question {}", i)})).collect();
    let raw = serde_json::to_string(&items).unwrap();
    let survey = build_survey(&raw, &english_defaults());

    assert_eq!(survey.requested_count, 20);
    for (i, q) in survey.questions.iter().enumerate() {
        assert_eq!(q.text, format!("Question {}", i + 1));
    }
}
