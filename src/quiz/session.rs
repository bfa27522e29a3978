// src/quiz/session.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::{
        question::Question,
        session::{AnswerRecord, QuizResult},
    },
    quiz::{builder::QuizMode, error::QuizError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
}

/// One user's quiz attempt.
///
/// `answers` is always a gapless prefix of `questions`, and `correct_count`
/// always equals the number of correct records in `answers`.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: String,
    topic: String,
    mode: QuizMode,
    questions: Vec<Question>,
    answers: Vec<AnswerRecord>,
    correct_count: usize,
    created_at: DateTime<Utc>,
}

impl SessionState {
    /// Starts a session over an already frozen question list.
    pub fn new(
        id: String,
        topic: String,
        mode: QuizMode,
        questions: Vec<Question>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyPool { topic });
        }

        Ok(Self {
            id,
            topic,
            mode,
            questions,
            answers: Vec::new(),
            correct_count: 0,
            created_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn status(&self) -> SessionStatus {
        if self.answers.len() == self.questions.len() {
            SessionStatus::Completed
        } else {
            SessionStatus::Active
        }
    }

    /// First unanswered index; equals `total()` once completed.
    pub fn next_unanswered(&self) -> usize {
        self.answers.len()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.total()
    }

    pub fn next_index_after(&self, index: usize) -> Option<usize> {
        if self.is_last(index) { None } else { Some(index + 1) }
    }

    fn checked_index(&self, index: i64) -> Result<usize, QuizError> {
        usize::try_from(index)
            .ok()
            .filter(|i| *i < self.questions.len())
            .ok_or(QuizError::IndexOutOfRange {
                index,
                total: self.questions.len(),
            })
    }

    /// Returns the frozen question at `index` and its answer, if any.
    pub fn question(&self, index: i64) -> Result<(&Question, Option<&AnswerRecord>), QuizError> {
        let index = self.checked_index(index)?;
        Ok((&self.questions[index], self.answers.get(index)))
    }

    /// Records the first answer for `index`.
    ///
    /// All checks run before any mutation, so a failed call changes nothing.
    pub fn submit(&mut self, index: i64, chosen: &str) -> Result<AnswerRecord, QuizError> {
        let index = self.checked_index(index)?;

        if index < self.next_unanswered() {
            return Err(QuizError::AlreadyAnswered { index });
        }
        if index > self.next_unanswered() {
            return Err(QuizError::OutOfOrder {
                index,
                next_index: self.next_unanswered(),
            });
        }

        let question = &self.questions[index];
        let record = AnswerRecord {
            word: question.word.clone(),
            user_answer: chosen.to_string(),
            correct_answer: question.translation.clone(),
            is_correct: chosen == question.translation,
        };

        if record.is_correct {
            self.correct_count += 1;
        }
        self.answers.push(record.clone());
        Ok(record)
    }

    /// Final score; refused until every question is answered.
    pub fn result(&self) -> Result<QuizResult, QuizError> {
        if self.next_unanswered() < self.questions.len() {
            return Err(QuizError::IncompleteQuiz {
                next_index: self.next_unanswered(),
            });
        }

        Ok(QuizResult {
            correct_count: self.correct_count,
            total_questions: self.total(),
            score_percentage: percentage(self.correct_count, self.total()),
            answers: self.answers.clone(),
        })
    }
}

/// `round(100 * correct / total)` in integer arithmetic, ties to even.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }

    let scaled = 100 * correct;
    let quotient = scaled / total;
    let twice_remainder = 2 * (scaled % total);

    let rounded = if twice_remainder > total || (twice_remainder == total && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded as u32
}
