// src/vocabulary.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    models::word::{TopicSummary, WordPair},
    utils::html::plain_text,
};

/// Topic installed when no CSV file could be loaded.
pub const DUMMY_TOPIC: &str = "default_dummy";

/// Read access to the named word lists.
pub trait VocabularySource: Send + Sync {
    /// Words of `topic` in file order; empty for unknown topics.
    fn words(&self, topic: &str) -> Vec<WordPair>;

    /// All topics, sorted by display name.
    fn topics(&self) -> Vec<TopicSummary>;
}

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("{path}: missing 'word' or 'translation' column")]
    MissingColumns { path: PathBuf },
}

/// Word lists loaded once at startup, one topic per CSV file.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    sets: BTreeMap<String, Vec<WordPair>>,
}

impl Vocabulary {
    pub fn from_sets<I, S>(sets: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<WordPair>)>,
        S: Into<String>,
    {
        Self {
            sets: sets.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn dummy() -> Self {
        Self::from_sets([(
            DUMMY_TOPIC,
            vec![
                WordPair::new("Hund", "dog"),
                WordPair::new("Katze", "cat"),
                WordPair::new("Baum", "tree"),
                WordPair::new("Haus", "house"),
                WordPair::new("Wasser", "water"),
            ],
        )])
    }

    /// Loads every `*.csv` file in `dir`.
    ///
    /// Broken files are logged and skipped. A missing directory is created.
    /// Falls back to [`Vocabulary::dummy`] when nothing could be loaded.
    pub fn load_dir(dir: &Path) -> Self {
        let mut sets = BTreeMap::new();

        match fs::read_dir(dir) {
            Ok(entries) => {
                let mut paths: Vec<PathBuf> = entries
                    .filter_map(|e| e.ok().map(|e| e.path()))
                    .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
                    .collect();
                paths.sort();

                for path in paths {
                    let Some(topic) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    match load_file(&path) {
                        Ok(words) => {
                            tracing::info!("Loaded {} words from {}", words.len(), topic);
                            sets.insert(topic.to_string(), words);
                        }
                        Err(e) => tracing::error!("Skipping {}: {}", path.display(), e),
                    }
                }
            }
            Err(_) => {
                if let Err(e) = fs::create_dir_all(dir) {
                    tracing::error!("Failed to create {}: {}", dir.display(), e);
                } else {
                    tracing::warn!("Created directory {}. Please add CSV files.", dir.display());
                }
            }
        }

        if sets.is_empty() {
            tracing::warn!("No CSV files found. Loading dummy data.");
            return Self::dummy();
        }
        Self { sets }
    }
}

impl VocabularySource for Vocabulary {
    fn words(&self, topic: &str) -> Vec<WordPair> {
        self.sets.get(topic).cloned().unwrap_or_default()
    }

    fn topics(&self) -> Vec<TopicSummary> {
        let mut topics: Vec<TopicSummary> = self
            .sets
            .iter()
            .map(|(id, words)| TopicSummary {
                id: id.clone(),
                name: display_name(id),
                count: words.len(),
            })
            .collect();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        topics
    }
}

/// Reads one topic file. Requires `word` and `translation` header columns.
fn load_file(path: &Path) -> Result<Vec<WordPair>, VocabularyError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (Some(word_col), Some(translation_col)) = (column("word"), column("translation")) else {
        return Err(VocabularyError::MissingColumns {
            path: path.to_path_buf(),
        });
    };

    let mut words = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let cells = record
            .get(word_col)
            .map(plain_text)
            .zip(record.get(translation_col).map(plain_text));
        match cells {
            Some((word, translation)) if !word.is_empty() && !translation.is_empty() => {
                words.push(WordPair::new(word, translation));
            }
            _ => tracing::warn!("{}: skipping incomplete row {}", path.display(), line + 2),
        }
    }
    Ok(words)
}

/// `german_basics` -> `German Basics`.
fn display_name(id: &str) -> String {
    let mut name = String::with_capacity(id.len());
    let mut prev_alpha = false;
    for c in id.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                name.extend(c.to_lowercase());
            } else {
                name.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            name.push(c);
            prev_alpha = false;
        }
    }
    name
}
