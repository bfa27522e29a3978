// src/models/question.rs

use serde::Serialize;

use crate::models::session::AnswerRecord;

/// A multiple-choice question, frozen when the session is created.
///
/// `options` holds `translation` exactly once and never contains duplicates.
/// The order of `options` is fixed for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// The prompt word.
    pub word: String,

    /// The correct answer.
    pub translation: String,

    /// Shuffled choices (correct answer plus distractors).
    pub options: Vec<String>,
}

/// DTO for sending a question to the client (excludes the correct translation).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub word: String,
    pub options: Vec<String>,
    pub current_index: usize,
    pub total_questions: usize,

    /// Present when the question was already answered, so the client can
    /// re-render the feedback without resubmitting.
    pub answer_record: Option<AnswerRecord>,
}
