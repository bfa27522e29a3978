// src/models/word.rs

use serde::{Deserialize, Serialize};

/// One vocabulary entry: the prompt shown to the user and its correct translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub word: String,
    pub translation: String,
}

impl WordPair {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
        }
    }
}

/// Entry of the topic listing returned by `GET /api/topics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    /// Topic id, the CSV file stem.
    pub id: String,
    /// Human readable name derived from the id.
    pub name: String,
    /// Number of words in the topic.
    pub count: usize,
}
