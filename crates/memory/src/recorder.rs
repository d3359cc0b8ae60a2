//! The session recorder agents write through.

use agentdesk_config::MemoryConfig;
use agentdesk_core::error::MemoryError;
use agentdesk_core::memory::{MemoryRecord, MemoryStore};
use tracing::{debug, warn};

use crate::backend::StorageBackend;
use crate::transient::TransientStore;

/// Fans every entry out to a short-term and a long-term store.
///
/// Logging is best effort: a failing store is reported with `warn!` and
/// never surfaces to the caller.
pub struct SessionMemory {
    short: TransientStore,
    long: StorageBackend,
}

impl SessionMemory {
    pub fn new(short: TransientStore, long: StorageBackend) -> Self {
        Self { short, long }
    }

    /// Build both stores from configuration, probing the durable store.
    pub async fn from_config(config: &MemoryConfig) -> Self {
        Self::new(
            TransientStore::new(config.max_short_memory_size),
            StorageBackend::select(config).await,
        )
    }

    /// Both stores in-process, with default caps.
    pub fn transient() -> Self {
        let config = MemoryConfig::default();
        Self::new(
            TransientStore::new(config.max_short_memory_size),
            StorageBackend::Transient(TransientStore::new(config.max_long_memory_size)),
        )
    }

    /// Append one entry to both stores.
    pub async fn log(&self, session_id: &str, message: impl Into<String>) {
        let record = MemoryRecord::new(session_id, message);
        debug!(session_id = %session_id, message = %record.message, "memory");

        if let Err(e) = self.short.append(record.clone()).await {
            warn!(session_id = %session_id, error = %e, "Short-term memory write failed");
        }
        if let Err(e) = self.long.append(record).await {
            warn!(session_id = %session_id, error = %e, backend = self.long.name(), "Long-term memory write failed");
        }
    }

    /// Short-term entries for a session, oldest first.
    pub async fn recent(&self, session_id: &str) -> Result<Vec<MemoryRecord>, MemoryError> {
        self.short.history(session_id).await
    }

    /// Long-term entries for a session, oldest first.
    pub async fn history(&self, session_id: &str) -> Result<Vec<MemoryRecord>, MemoryError> {
        self.long.history(session_id).await
    }

    /// Forget a session's short-term entries. The long-term log is kept.
    pub async fn clear(&self, session_id: &str) -> Result<usize, MemoryError> {
        self.short.clear(session_id).await
    }

    /// Name of the long-term backend ("sqlite" or "transient").
    pub fn backend_name(&self) -> &str {
        self.long.name()
    }

    pub fn is_durable(&self) -> bool {
        self.long.is_durable()
    }
}
