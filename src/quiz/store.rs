// src/quiz/store.rs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::quiz::session::SessionState;

/// A session shared between concurrent requests. The mutex is the unit of
/// mutual exclusion: different sessions never contend.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Storage for live sessions, keyed by their opaque id.
///
/// Implementations must never return an expired session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Exact-match lookup. Expired entries are evicted and reported absent.
    async fn get(&self, id: &str) -> Option<SharedSession>;

    async fn put(&self, state: SessionState);

    /// Removes the session. Absent ids are ignored.
    async fn delete(&self, id: &str);

    /// Evicts every expired session, returning how many were removed.
    async fn sweep(&self) -> usize;

    async fn len(&self) -> usize;
}

struct Entry {
    created_at: DateTime<Utc>,
    session: SharedSession,
}

/// Process-local store with a fixed lifetime measured from session creation.
pub struct InMemorySessionStore {
    timeout: Duration,
    sessions: RwLock<HashMap<String, Entry>>,
}

impl InMemorySessionStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - created_at > self.timeout
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &str) -> Option<SharedSession> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            let entry = sessions.get(id)?;
            if !self.is_expired(entry.created_at, now) {
                return Some(entry.session.clone());
            }
        }

        let mut sessions = self.sessions.write().await;
        let expired = sessions
            .get(id)
            .is_some_and(|entry| self.is_expired(entry.created_at, now));
        if expired {
            sessions.remove(id);
            tracing::info!("Session expired: {}", id);
        }
        None
    }

    async fn put(&self, state: SessionState) {
        let id = state.id().to_string();
        let entry = Entry {
            created_at: state.created_at(),
            session: Arc::new(Mutex::new(state)),
        };
        self.sessions.write().await.insert(id, entry);
    }

    async fn delete(&self, id: &str) {
        self.sessions.write().await.remove(id);
    }

    async fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry.created_at, now));
        before - sessions.len()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::question::Question, quiz::builder::QuizMode};

    fn state(id: &str, created_at: DateTime<Utc>) -> SessionState {
        let question = Question {
            word: "Hund".to_string(),
            translation: "dog".to_string(),
            options: vec![
                "cat".to_string(),
                "dog".to_string(),
                "tree".to_string(),
                "house".to_string(),
            ],
        };
        SessionState::new(
            id.to_string(),
            "animals".to_string(),
            QuizMode::Standard,
            vec![question],
            created_at,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn put_get_delete() {
        let store = InMemorySessionStore::new(Duration::minutes(120));
        store.put(state("a", Utc::now())).await;

        let session = store.get("a").await.expect("session present");
        assert_eq!(session.lock().await.id(), "a");
        assert!(store.get("A").await.is_none());

        store.delete("a").await;
        store.delete("a").await;
        assert!(store.get("a").await.is_none());
    }

    #[tokio::test]
    async fn expired_session_is_evicted_on_lookup() {
        let store = InMemorySessionStore::new(Duration::minutes(120));
        store
            .put(state("old", Utc::now() - Duration::minutes(121)))
            .await;
        assert_eq!(store.len().await, 1);

        assert!(store.get("old").await.is_none());
        assert_eq!(store.len().await, 0);
        assert!(store.get("old").await.is_none());
    }

    #[tokio::test]
    async fn sweep_removes_only_expired() {
        let store = InMemorySessionStore::new(Duration::minutes(10));
        store.put(state("fresh", Utc::now())).await;
        store
            .put(state("stale-1", Utc::now() - Duration::minutes(11)))
            .await;
        store
            .put(state("stale-2", Utc::now() - Duration::hours(5)))
            .await;

        assert_eq!(store.sweep().await, 2);
        assert_eq!(store.len().await, 1);
        assert!(store.get("fresh").await.is_some());
    }
}
