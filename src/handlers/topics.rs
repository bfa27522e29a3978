// src/handlers/topics.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::vocabulary::VocabularySource;

/// Lists the available vocabulary topics.
pub async fn list_topics(State(vocabulary): State<Arc<dyn VocabularySource>>) -> impl IntoResponse {
    Json(vocabulary.topics())
}
