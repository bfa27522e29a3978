// src/quiz/builder.rs

use std::sync::Arc;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use crate::{
    models::{question::Question, word::WordPair},
    quiz::distractor::{self, DISTRACTOR_COUNT},
    vocabulary::VocabularySource,
};

/// Question generation mode, chosen when a quiz starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Random sample of the topic, random distractors.
    #[default]
    Standard,
}

impl QuizMode {
    /// Resolves a client supplied tag. Unknown tags fall back to `Standard`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            None | Some("") | Some("standard") => QuizMode::Standard,
            Some(other) => {
                tracing::warn!("Unknown quiz mode '{}', using standard", other);
                QuizMode::Standard
            }
        }
    }
}

/// Produces the frozen question list for a new session.
pub trait QuestionBuilder: Send + Sync {
    /// Returns at most `count` questions for `topic`; empty when the topic
    /// has no words. Never fails.
    fn build(&self, topic: &str, count: usize) -> Vec<Question>;
}

/// Standard mode: samples words uniformly and draws distractors from the
/// entire topic pool.
pub struct RandomQuestionBuilder {
    vocabulary: Arc<dyn VocabularySource>,
}

impl RandomQuestionBuilder {
    pub fn new(vocabulary: Arc<dyn VocabularySource>) -> Self {
        Self { vocabulary }
    }
}

impl QuestionBuilder for RandomQuestionBuilder {
    fn build(&self, topic: &str, count: usize) -> Vec<Question> {
        let pool = self.vocabulary.words(topic);
        build_questions(&pool, count, &mut rand::rng())
    }
}

/// Draws `min(count, pool.len())` distinct words and turns each into a question.
///
/// Draw order becomes question order. Each question shuffles its options
/// independently.
pub fn build_questions<R: Rng + ?Sized>(
    pool: &[WordPair],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let size = count.min(pool.len());
    let drawn: Vec<WordPair> = pool.choose_multiple(rng, size).cloned().collect();

    drawn
        .into_iter()
        .map(|pair| {
            let mut options = distractor::generate(&pair.translation, pool, DISTRACTOR_COUNT, rng);
            options.push(pair.translation.clone());
            options.shuffle(rng);
            Question {
                word: pair.word,
                translation: pair.translation,
                options,
            }
        })
        .collect()
}
