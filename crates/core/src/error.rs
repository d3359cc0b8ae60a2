//! Error types for the AgentDesk domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all AgentDesk operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Agent errors ---
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Store unreachable: {0}")]
    Unreachable(String),
}

/// Failures raised while a single agent executes a task.
///
/// The router isolates these per agent: one failing agent never aborts the
/// whole request.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    #[error("{agent} provider call failed: {source}")]
    Provider {
        agent: String,
        #[source]
        source: ProviderError,
    },

    #[error("{agent} produced an empty result")]
    EmptyResult { agent: String },

    #[error("{agent} timed out after {timeout_secs}s")]
    Timeout { agent: String, timeout_secs: u64 },

    #[error("{agent} failed: {reason}")]
    ExecutionFailed { agent: String, reason: String },
}

impl AgentError {
    /// Name of the agent that raised this error.
    pub fn agent(&self) -> &str {
        match self {
            Self::Provider { agent, .. }
            | Self::EmptyResult { agent }
            | Self::Timeout { agent, .. }
            | Self::ExecutionFailed { agent, .. } => agent,
        }
    }
}
