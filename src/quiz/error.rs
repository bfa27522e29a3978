// src/quiz/error.rs

use thiserror::Error;

/// Errors emitted by the quiz engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("no vocabulary available for topic '{topic}'")]
    EmptyPool { topic: String },

    #[error("session is missing or expired")]
    SessionInvalid,

    #[error("question index {index} is out of range (total {total})")]
    IndexOutOfRange { index: i64, total: usize },

    #[error("option {position} does not exist (question has {options} options)")]
    OptionOutOfRange { position: usize, options: usize },

    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },

    #[error("question {index} cannot be answered before question {next_index}")]
    OutOfOrder { index: usize, next_index: usize },

    #[error("quiz is not finished, next question is {next_index}")]
    IncompleteQuiz { next_index: usize },
}
