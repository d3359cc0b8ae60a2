//! Agent trait: a named handler the router can dispatch a task to.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::task::AgentOutput;

/// The core Agent trait.
///
/// Every agent variant implements both methods explicitly. An agent with no
/// natural trigger words returns `false` from [`can_handle`](Agent::can_handle)
/// and only runs when the router wires it in directly (the default responder).
///
/// Agents are created once at startup and shared read-only across
/// concurrent requests, so implementations hold no per-request state.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Unique name within a registry; also the key in the aggregated result.
    fn name(&self) -> &str;

    /// One-line description of what this agent does.
    fn description(&self) -> &str;

    /// Pure relevance predicate. Must not panic or have side effects.
    fn can_handle(&self, task: &str) -> bool;

    /// Run the task for a session.
    ///
    /// Implementations log one memory entry before acting and one after,
    /// the latter including the result.
    async fn execute(&self, session_id: &str, task: &str) -> Result<AgentOutput, AgentError>;
}
