//! In-process store: a per-session ring of records behind a `RwLock`.
//!
//! Serves as the short-term store and as the fallback when no durable store
//! is reachable. Nothing survives a restart.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use agentdesk_core::error::MemoryError;
use agentdesk_core::memory::{MemoryRecord, MemoryStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Session-keyed transient store holding at most `capacity` records per
/// session; the oldest record is dropped first.
#[derive(Clone)]
pub struct TransientStore {
    sessions: Arc<RwLock<HashMap<String, VecDeque<MemoryRecord>>>>,
    capacity: usize,
}

impl TransientStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of sessions with at least one record.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl std::fmt::Debug for TransientStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransientStore")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MemoryStore for TransientStore {
    fn name(&self) -> &str {
        "transient"
    }

    async fn append(&self, record: MemoryRecord) -> Result<(), MemoryError> {
        let mut sessions = self.sessions.write().await;
        let log = sessions.entry(record.session_id.clone()).or_default();
        if log.len() >= self.capacity {
            log.pop_front();
        }
        log.push_back(record);
        Ok(())
    }

    async fn history(&self, session_id: &str) -> Result<Vec<MemoryRecord>, MemoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn clear(&self, session_id: &str) -> Result<usize, MemoryError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(session_id).map(|log| log.len()).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_and_read_in_order() {
        let store = TransientStore::new(10);
        store.append(MemoryRecord::new("s1", "first")).await.unwrap();
        store.append(MemoryRecord::new("s1", "second")).await.unwrap();
        store.append(MemoryRecord::new("s2", "other")).await.unwrap();

        let history = store.history("s1").await.unwrap();
        let messages: Vec<&str> = history.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn unknown_session_is_empty() {
        let store = TransientStore::new(10);
        assert!(store.history("nobody").await.unwrap().is_empty());
        assert_eq!(store.clear("nobody").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn capacity_drops_oldest() {
        let store = TransientStore::new(3);
        for i in 0..5 {
            store
                .append(MemoryRecord::new("s1", format!("m{i}")))
                .await
                .unwrap();
        }
        let history = store.history("s1").await.unwrap();
        let messages: Vec<&str> = history.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["m2", "m3", "m4"]);
    }

    #[tokio::test]
    async fn clear_removes_only_that_session() {
        let store = TransientStore::new(10);
        store.append(MemoryRecord::new("s1", "a")).await.unwrap();
        store.append(MemoryRecord::new("s1", "b")).await.unwrap();
        store.append(MemoryRecord::new("s2", "c")).await.unwrap();

        assert_eq!(store.clear("s1").await.unwrap(), 2);
        assert!(store.history("s1").await.unwrap().is_empty());
        assert_eq!(store.history("s2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_appends_are_all_kept() {
        let store = TransientStore::new(1000);
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append(MemoryRecord::new("shared", format!("m{i}")))
                    .await
                    .unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(store.history("shared").await.unwrap().len(), 20);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        assert_eq!(TransientStore::new(0).capacity(), 1);
    }
}
