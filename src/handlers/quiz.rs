// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::session::{StartQuizRequest, StartQuizResponse, SubmitAnswerRequest, SubmitAnswerResponse},
    quiz::{QuizService, builder::QuizMode},
};

/// Reads the session id cookie. The value is only ever used as an exact-match key.
fn session_id(jar: &CookieJar, config: &Config) -> Option<String> {
    jar.get(&config.session_cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// Starts a new quiz for a topic.
///
/// * Validates the payload.
/// * Freezes the question set (size from payload or `QUIZ_SIZE`).
/// * Returns 201 and sets the session cookie.
pub async fn start_quiz(
    State(quiz): State<Arc<QuizService>>,
    State(config): State<Config>,
    jar: CookieJar,
    Json(payload): Json<StartQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mode = QuizMode::from_tag(payload.mode.as_deref());
    let count = payload.count.unwrap_or(config.quiz_size);
    let created = quiz.create_session(&payload.topic, count, mode).await?;

    let cookie = Cookie::build((config.session_cookie_name.clone(), created.session_id.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/");

    Ok((
        StatusCode::CREATED,
        jar.add(cookie),
        Json(StartQuizResponse {
            session_id: created.session_id,
            topic: created.topic,
            mode: created.mode,
            total_questions: created.total_questions,
        }),
    ))
}

/// Returns question `index` with its frozen options and, if already
/// answered, the stored answer record.
pub async fn get_question(
    State(quiz): State<Arc<QuizService>>,
    State(config): State<Config>,
    jar: CookieJar,
    Path(index): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let question = quiz
        .get_question(session_id(&jar, &config).as_deref(), index)
        .await?;
    Ok(Json(question))
}

/// Submits the answer for question `index`.
///
/// Accepts either the option text or its position. The first submission
/// for an index wins; later ones get 409.
pub async fn submit_answer(
    State(quiz): State<Arc<QuizService>>,
    State(config): State<Config>,
    jar: CookieJar,
    Path(index): Path<i64>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let choice = payload.choice().ok_or_else(|| {
        AppError::BadRequest("Provide exactly one of 'answer' or 'option_index'".to_string())
    })?;

    let submitted = quiz
        .submit_answer(session_id(&jar, &config).as_deref(), index, choice)
        .await?;

    Ok(Json(SubmitAnswerResponse {
        record: submitted.record,
        next_index: submitted.next_index,
        completed: submitted.completed,
    }))
}

/// Returns the final score. Answers 409 with `next_index` while the quiz
/// is still in progress.
pub async fn get_result(
    State(quiz): State<Arc<QuizService>>,
    State(config): State<Config>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let result = quiz
        .get_result(session_id(&jar, &config).as_deref())
        .await?;
    Ok(Json(result))
}

/// Drops the session and clears the cookie. Always succeeds.
pub async fn reset_session(
    State(quiz): State<Arc<QuizService>>,
    State(config): State<Config>,
    jar: CookieJar,
) -> impl IntoResponse {
    quiz.reset_session(session_id(&jar, &config).as_deref())
        .await;

    let jar = jar.remove(Cookie::build(config.session_cookie_name.clone()).path("/"));
    (jar, Json(json!({ "status": "success" })))
}
