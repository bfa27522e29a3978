// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::quiz::QuizError;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized (missing or expired quiz session)
    SessionInvalid(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., question already answered)
    Conflict(String),

    // 409 Conflict, client should continue at `next_index`
    Redirect { message: String, next_index: usize },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::SessionInvalid(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::Redirect {
                message,
                next_index,
            } => (
                StatusCode::CONFLICT,
                json!({ "error": message, "next_index": next_index }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Maps quiz engine errors onto HTTP semantics.
impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        let message = err.to_string();
        match err {
            QuizError::EmptyPool { .. } => AppError::NotFound(message),
            QuizError::SessionInvalid => AppError::SessionInvalid(message),
            QuizError::IndexOutOfRange { .. } => AppError::NotFound(message),
            QuizError::OptionOutOfRange { .. } => AppError::BadRequest(message),
            QuizError::AlreadyAnswered { .. } => AppError::Conflict(message),
            QuizError::OutOfOrder { next_index, .. } | QuizError::IncompleteQuiz { next_index } => {
                AppError::Redirect {
                    message,
                    next_index,
                }
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
