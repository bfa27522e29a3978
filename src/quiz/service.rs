// src/quiz/service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    models::{
        question::PublicQuestion,
        session::{AnswerRecord, Choice, QuizResult},
    },
    quiz::{
        builder::{QuestionBuilder, QuizMode, RandomQuestionBuilder},
        error::QuizError,
        session::SessionState,
        store::{SessionStore, SharedSession},
    },
    vocabulary::VocabularySource,
};

/// Answer feedback returned to the client after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub record: AnswerRecord,
    pub next_index: Option<usize>,
    pub completed: bool,
}

/// Session created by [`QuizService::create_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSession {
    pub session_id: String,
    pub topic: String,
    pub mode: QuizMode,
    pub total_questions: usize,
}

/// Entry point used by the HTTP handlers: builds quizzes, resolves session
/// ids and drives the per-session state machine.
pub struct QuizService {
    store: Arc<dyn SessionStore>,
    standard: RandomQuestionBuilder,
}

impl QuizService {
    pub fn new(vocabulary: Arc<dyn VocabularySource>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            standard: RandomQuestionBuilder::new(vocabulary),
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    fn builder(&self, mode: QuizMode) -> &dyn QuestionBuilder {
        match mode {
            QuizMode::Standard => &self.standard,
        }
    }

    async fn session(&self, session_id: Option<&str>) -> Result<SharedSession, QuizError> {
        let id = session_id.ok_or(QuizError::SessionInvalid)?;
        self.store.get(id).await.ok_or(QuizError::SessionInvalid)
    }

    /// Freezes a new question set for `topic` and stores it under a fresh id.
    pub async fn create_session(
        &self,
        topic: &str,
        count: usize,
        mode: QuizMode,
    ) -> Result<CreatedSession, QuizError> {
        let questions = self.builder(mode).build(topic, count);
        let session_id = Uuid::new_v4().to_string();
        let state = SessionState::new(
            session_id.clone(),
            topic.to_string(),
            mode,
            questions,
            Utc::now(),
        )?;
        let total_questions = state.total();
        tracing::info!(
            "New session: {} [Topic: {}, Mode: {:?}, Questions: {}]",
            state.id(),
            state.topic(),
            state.mode(),
            total_questions
        );
        self.store.put(state).await;

        Ok(CreatedSession {
            session_id,
            topic: topic.to_string(),
            mode,
            total_questions,
        })
    }

    pub async fn get_question(
        &self,
        session_id: Option<&str>,
        index: i64,
    ) -> Result<PublicQuestion, QuizError> {
        let session = self.session(session_id).await?;
        let state = session.lock().await;
        let (question, record) = state.question(index)?;

        Ok(PublicQuestion {
            word: question.word.clone(),
            options: question.options.clone(),
            current_index: index as usize,
            total_questions: state.total(),
            answer_record: record.cloned(),
        })
    }

    /// Records the answer for `index`. Concurrent calls for the same session
    /// are serialized; exactly one of them can win a given index.
    pub async fn submit_answer(
        &self,
        session_id: Option<&str>,
        index: i64,
        choice: Choice,
    ) -> Result<SubmittedAnswer, QuizError> {
        let session = self.session(session_id).await?;
        let mut state = session.lock().await;

        let chosen = match choice {
            Choice::Text(text) => Ok(text),
            Choice::Position(position) => option_at(&state, index, position),
        };

        let record = match chosen.and_then(|chosen| state.submit(index, &chosen)) {
            Ok(record) => record,
            Err(e) => {
                if let QuizError::AlreadyAnswered { .. } = e {
                    tracing::debug!("Duplicate submission for session {}: {}", state.id(), e);
                }
                return Err(e);
            }
        };
        let answered = index as usize;

        Ok(SubmittedAnswer {
            record,
            next_index: state.next_index_after(answered),
            completed: state.is_last(answered),
        })
    }

    pub async fn get_result(&self, session_id: Option<&str>) -> Result<QuizResult, QuizError> {
        let session = self.session(session_id).await?;
        let state = session.lock().await;
        state.result()
    }

    /// Deletes the session. Unknown or missing ids are a no-op.
    pub async fn reset_session(&self, session_id: Option<&str>) {
        if let Some(id) = session_id {
            self.store.delete(id).await;
            tracing::info!("Session reset: {}", id);
        }
    }
}

/// Resolves an option position against the frozen options of an unanswered
/// question. Answered questions report `AlreadyAnswered` whatever the position.
fn option_at(state: &SessionState, index: i64, position: usize) -> Result<String, QuizError> {
    let (question, record) = state.question(index)?;
    if record.is_some() {
        return Err(QuizError::AlreadyAnswered {
            index: index as usize,
        });
    }

    question
        .options
        .get(position)
        .cloned()
        .ok_or(QuizError::OptionOutOfRange {
            position,
            options: question.options.len(),
        })
}
