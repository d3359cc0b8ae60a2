//! # AgentDesk Core
//!
//! Domain types, traits, and error definitions for the AgentDesk task router.
//! This crate has **no framework dependencies**: it defines the domain model
//! that every other crate implements against.
//!
//! - [`Agent`]: a named handler that can judge relevance and execute a task
//! - [`Provider`]: a text-generation backend used by the default responder
//! - [`MemoryStore`]: an append-only per-session log
//! - [`ExecutionResult`]: the ordered agent-name → output mapping a router returns

pub mod agent;
pub mod error;
pub mod memory;
pub mod message;
pub mod provider;
pub mod task;

// Re-export key types at crate root for ergonomics
pub use agent::Agent;
pub use error::{AgentError, Error, MemoryError, ProviderError, Result};
pub use memory::{MemoryRecord, MemoryStore};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use task::{AgentOutput, ExecutionResult, Task};
