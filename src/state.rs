// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, quiz::QuizService, vocabulary::VocabularySource};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub vocabulary: Arc<dyn VocabularySource>,
    pub quiz: Arc<QuizService>,
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn VocabularySource> {
    fn from_ref(state: &AppState) -> Self {
        state.vocabulary.clone()
    }
}

impl FromRef<AppState> for Arc<QuizService> {
    fn from_ref(state: &AppState) -> Self {
        state.quiz.clone()
    }
}
