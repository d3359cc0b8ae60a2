//! SQLite durable store.
//!
//! One table (named by `memory.database_name`) holding every record.
//! An integer rowid preserves insertion order within a session.

use std::str::FromStr;

use agentdesk_core::error::MemoryError;
use agentdesk_core::memory::{MemoryRecord, MemoryStore};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

/// Durable session log on SQLite.
pub struct SqliteStore {
    pool: SqlitePool,
    table: String,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url` and ensure `table`
    /// exists.
    ///
    /// Pass `"sqlite::memory:"` for an ephemeral database.
    pub async fn connect(url: &str, table: &str) -> Result<Self, MemoryError> {
        if !is_table_name(table) {
            return Err(MemoryError::Storage(format!("Invalid table name '{table}'")));
        }

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut options = SqliteConnectOptions::from_str(url)
            .map_err(|e| MemoryError::Unreachable(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .synchronous(SqliteSynchronous::Normal);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        // Every connection to `:memory:` opens a separate database.
        let max_connections = if in_memory { 1 } else { 4 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| MemoryError::Unreachable(format!("Failed to open SQLite: {e}")))?;

        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.run_migrations().await?;
        info!(table = %store.table, "SQLite memory store initialized at {url}");
        Ok(store)
    }

    /// Create the record table and its session index.
    async fn run_migrations(&self) -> Result<(), MemoryError> {
        let create = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                iid         INTEGER PRIMARY KEY AUTOINCREMENT,
                id          TEXT UNIQUE NOT NULL,
                session_id  TEXT NOT NULL,
                message     TEXT NOT NULL,
                created_at  TEXT NOT NULL
            )
            "#,
            table = self.table
        );
        sqlx::query(&create)
            .execute(&self.pool)
            .await
            .map_err(|e| MemoryError::MigrationFailed(format!("{} table: {e}", self.table)))?;

        let index = format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_session ON {table}(session_id, iid)",
            table = self.table
        );
        sqlx::query(&index)
            .execute(&self.pool)
            .await
            .map_err(|e| MemoryError::MigrationFailed(format!("session index: {e}")))?;

        debug!("SQLite migrations complete");
        Ok(())
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), MemoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| MemoryError::Unreachable(e.to_string()))?;
        Ok(())
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<MemoryRecord, MemoryError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| MemoryError::QueryFailed(format!("id column: {e}")))?;
        let session_id: String = row
            .try_get("session_id")
            .map_err(|e| MemoryError::QueryFailed(format!("session_id column: {e}")))?;
        let message: String = row
            .try_get("message")
            .map_err(|e| MemoryError::QueryFailed(format!("message column: {e}")))?;
        let created_at_str: String = row
            .try_get("created_at")
            .map_err(|e| MemoryError::QueryFailed(format!("created_at column: {e}")))?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(MemoryRecord {
            id,
            session_id,
            message,
            created_at,
        })
    }
}

fn is_table_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl MemoryStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn append(&self, record: MemoryRecord) -> Result<(), MemoryError> {
        let insert = format!(
            "INSERT INTO {} (id, session_id, message, created_at) VALUES (?1, ?2, ?3, ?4)",
            self.table
        );
        sqlx::query(&insert)
            .bind(&record.id)
            .bind(&record.session_id)
            .bind(&record.message)
            .bind(record.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| MemoryError::Storage(format!("INSERT failed: {e}")))?;

        debug!(session_id = %record.session_id, "Stored memory record {}", record.id);
        Ok(())
    }

    async fn history(&self, session_id: &str) -> Result<Vec<MemoryRecord>, MemoryError> {
        let select = format!(
            "SELECT id, session_id, message, created_at FROM {} WHERE session_id = ?1 ORDER BY iid ASC",
            self.table
        );
        let rows = sqlx::query(&select)
            .bind(session_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MemoryError::QueryFailed(format!("history: {e}")))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn clear(&self, session_id: &str) -> Result<usize, MemoryError> {
        let delete = format!("DELETE FROM {} WHERE session_id = ?1", self.table);
        let result = sqlx::query(&delete)
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| MemoryError::Storage(format!("DELETE failed: {e}")))?;

        Ok(result.rows_affected() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:", "agentic_assistant")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn append_and_history() {
        let store = test_store().await;
        store.append(MemoryRecord::new("s1", "planner received: hi")).await.unwrap();
        store.append(MemoryRecord::new("s1", "LLM input: hi")).await.unwrap();
        store.append(MemoryRecord::new("s2", "unrelated")).await.unwrap();

        let history = store.history("s1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].message, "planner received: hi");
        assert_eq!(history[1].message, "LLM input: hi");
        assert!(history.iter().all(|r| r.session_id == "s1"));
    }

    #[tokio::test]
    async fn record_fields_survive_storage() {
        let store = test_store().await;
        let record = MemoryRecord::new("s1", "search result: Search results");
        store.append(record.clone()).await.unwrap();

        let loaded = &store.history("s1").await.unwrap()[0];
        assert_eq!(loaded.id, record.id);
        assert_eq!(loaded.created_at.timestamp(), record.created_at.timestamp());
    }

    #[tokio::test]
    async fn clear_session() {
        let store = test_store().await;
        store.append(MemoryRecord::new("s1", "a")).await.unwrap();
        store.append(MemoryRecord::new("s1", "b")).await.unwrap();
        store.append(MemoryRecord::new("s2", "c")).await.unwrap();

        assert_eq!(store.clear("s1").await.unwrap(), 2);
        assert!(store.history("s1").await.unwrap().is_empty());
        assert_eq!(store.history("s2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn custom_table_name() {
        let store = SqliteStore::connect("sqlite::memory:", "session_log").await.unwrap();
        assert_eq!(store.table(), "session_log");
        store.append(MemoryRecord::new("s1", "x")).await.unwrap();
        assert_eq!(store.history("s1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_table_name_rejected() {
        let result = SqliteStore::connect("sqlite::memory:", "bad name;").await;
        assert!(matches!(result, Err(MemoryError::Storage(_))));
    }

    #[tokio::test]
    async fn file_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("memory.db").display());

        {
            let store = SqliteStore::connect(&url, "agentic_assistant").await.unwrap();
            store.append(MemoryRecord::new("s1", "kept")).await.unwrap();
            store.ping().await.unwrap();
        }

        let reopened = SqliteStore::connect(&url, "agentic_assistant").await.unwrap();
        let history = reopened.history("s1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "kept");
    }

    #[tokio::test]
    async fn unopenable_path_is_unreachable() {
        let result =
            SqliteStore::connect("sqlite:///nonexistent-dir/sub/memory.db", "agentic_assistant")
                .await;
        assert!(matches!(result, Err(MemoryError::Unreachable(_))));
    }
}
