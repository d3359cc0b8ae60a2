//! Memory trait: append-only per-session interaction log.
//!
//! Every agent step is written as one [`MemoryRecord`]. Records are only
//! ever appended; within a session they come back in insertion order.
//! There is no ordering guarantee across sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MemoryError;

/// A single logged interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Unique ID for this record
    pub id: String,

    /// The session this record belongs to
    pub session_id: String,

    /// The logged message
    pub message: String,

    /// When this record was written
    pub created_at: DateTime<Utc>,
}

impl MemoryRecord {
    /// Create a record stamped with a fresh ID and the current time.
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// The core MemoryStore trait.
///
/// Implementations: in-process transient store, SQLite durable store.
/// Each `append` must be atomic with respect to concurrent appends from
/// other sessions.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// The backend name (e.g., "transient", "sqlite").
    fn name(&self) -> &str;

    /// Append a record to its session's log.
    async fn append(&self, record: MemoryRecord) -> std::result::Result<(), MemoryError>;

    /// All records for a session, oldest first.
    async fn history(&self, session_id: &str)
    -> std::result::Result<Vec<MemoryRecord>, MemoryError>;

    /// Drop every record of a session. Returns how many were removed.
    async fn clear(&self, session_id: &str) -> std::result::Result<usize, MemoryError>;
}
