// src/models/session.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::quiz::builder::QuizMode;

/// Topic ids are CSV file stems; anything else can never match a topic.
static TOPIC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid topic id regex"));

/// Outcome of answering one question. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub word: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Final score of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub correct_count: usize,
    pub total_questions: usize,
    pub score_percentage: u32,
    pub answers: Vec<AnswerRecord>,
}

/// DTO for starting a quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct StartQuizRequest {
    #[validate(regex(path = *TOPIC_ID, message = "Unknown topic id format."))]
    pub topic: String,

    /// Generation mode tag, `standard` when omitted.
    pub mode: Option<String>,

    /// Overrides the configured quiz size.
    #[validate(range(min = 1, max = 100))]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StartQuizResponse {
    pub session_id: String,
    pub topic: String,
    pub mode: QuizMode,
    pub total_questions: usize,
}

/// DTO for answering a question.
///
/// Exactly one of `answer` (the option text) or `option_index`
/// (position in the displayed options) must be given.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 500))]
    pub answer: Option<String>,
    pub option_index: Option<usize>,
}

/// Which option the user picked, as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Text(String),
    Position(usize),
}

impl SubmitAnswerRequest {
    /// Returns the chosen option, or `None` unless exactly one field is set.
    pub fn choice(self) -> Option<Choice> {
        match (self.answer, self.option_index) {
            (Some(text), None) => Some(Choice::Text(text)),
            (None, Some(position)) => Some(Choice::Position(position)),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub record: AnswerRecord,
    /// Index of the following question, `None` after the last one.
    pub next_index: Option<usize>,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_validation_rejects_path_like_ids() {
        let ok = StartQuizRequest {
            topic: "german_basics".to_string(),
            mode: None,
            count: None,
        };
        assert!(ok.validate().is_ok());

        let bad = StartQuizRequest {
            topic: "../etc/passwd".to_string(),
            mode: None,
            count: Some(0),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("topic"));
        assert!(fields.contains_key("count"));
    }

    #[test]
    fn choice_requires_exactly_one_field() {
        let both = SubmitAnswerRequest {
            answer: Some("dog".to_string()),
            option_index: Some(1),
        };
        assert_eq!(both.choice(), None);

        let neither = SubmitAnswerRequest {
            answer: None,
            option_index: None,
        };
        assert_eq!(neither.choice(), None);

        let text = SubmitAnswerRequest {
            answer: Some("dog".to_string()),
            option_index: None,
        };
        assert_eq!(text.choice(), Some(Choice::Text("dog".to_string())));
    }
}
