//! Session memory for AgentDesk.
//!
//! Every agent step is appended to two stores: a capped in-process
//! short-term store, and a long-term store that is durable (SQLite) when one
//! is configured and reachable.

pub mod backend;
pub mod recorder;
pub mod sqlite;
pub mod transient;

pub use backend::StorageBackend;
pub use recorder::SessionMemory;
pub use sqlite::SqliteStore;
pub use transient::TransientStore;
