//! Long-term storage selection.
//!
//! The backend is chosen once at startup: the durable store if it answers a
//! probe within the configured timeout, the transient store otherwise.

use std::time::Duration;

use agentdesk_config::MemoryConfig;
use agentdesk_core::error::MemoryError;
use agentdesk_core::memory::{MemoryRecord, MemoryStore};
use async_trait::async_trait;
use tracing::{info, warn};

use crate::sqlite::SqliteStore;
use crate::transient::TransientStore;

/// Where long-term records go for the lifetime of the process.
pub enum StorageBackend {
    Durable(SqliteStore),
    Transient(TransientStore),
}

impl StorageBackend {
    /// Probe the configured durable store and fall back to transient storage
    /// if it is absent, fails, or takes longer than `probe_timeout_ms`.
    pub async fn select(config: &MemoryConfig) -> Self {
        let fallback = || Self::Transient(TransientStore::new(config.max_long_memory_size));

        let Some(url) = config.database_url.as_deref() else {
            info!("No durable store configured, using transient long-term memory");
            return fallback();
        };

        let timeout = Duration::from_millis(config.probe_timeout_ms);
        match tokio::time::timeout(timeout, probe(url, &config.database_name)).await {
            Ok(Ok(store)) => {
                info!(table = %store.table(), "Durable memory store reachable");
                Self::Durable(store)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Durable memory store unavailable, using transient storage");
                fallback()
            }
            Err(_) => {
                warn!(
                    timeout_ms = config.probe_timeout_ms,
                    "Durable memory store probe timed out, using transient storage"
                );
                fallback()
            }
        }
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Durable(_))
    }

    fn store(&self) -> &dyn MemoryStore {
        match self {
            Self::Durable(s) => s as &dyn MemoryStore,
            Self::Transient(s) => s as &dyn MemoryStore,
        }
    }
}

async fn probe(url: &str, table: &str) -> Result<SqliteStore, MemoryError> {
    let store = SqliteStore::connect(url, table).await?;
    store.ping().await?;
    Ok(store)
}

#[async_trait]
impl MemoryStore for StorageBackend {
    fn name(&self) -> &str {
        self.store().name()
    }

    async fn append(&self, record: MemoryRecord) -> Result<(), MemoryError> {
        self.store().append(record).await
    }

    async fn history(&self, session_id: &str) -> Result<Vec<MemoryRecord>, MemoryError> {
        self.store().history(session_id).await
    }

    async fn clear(&self, session_id: &str) -> Result<usize, MemoryError> {
        self.store().clear(session_id).await
    }
}
