//! The planner: picks which agents handle a task and runs them in order.
//!
//! Selection is keyword-driven. [`ROUTES`] maps trigger words to agent
//! names; the domain agents answer `can_handle` from the same table, so
//! there is one definition of what each agent responds to.
//!
//! ```text
//! task ──► plan ──► [llm] + matched routes (table order) + extension agents
//!                      │
//!                      ▼
//!          sequential execute, one result per agent
//! ```

use std::sync::Arc;
use std::time::Duration;

use agentdesk_core::agent::Agent;
use agentdesk_core::error::AgentError;
use agentdesk_core::task::{AgentOutput, ExecutionResult, Task};
use agentdesk_memory::SessionMemory;
use tracing::{debug, info, warn};

use crate::registry::AgentRegistry;

/// Name of the agent that answers every task it is registered for.
pub const DEFAULT_RESPONDER: &str = "llm";

/// A keyword set routed to one agent.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub agent: &'static str,
    pub keywords: &'static [&'static str],
}

impl Route {
    /// Case-insensitive substring match against any keyword.
    pub fn matches(&self, task: &str) -> bool {
        let lower = task.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k))
    }
}

/// Scan order is selection order.
pub const ROUTES: &[Route] = &[
    Route {
        agent: "search",
        keywords: &["weather", "search", "pulp fiction"],
    },
    Route {
        agent: "calendar",
        keywords: &["calendar", "event", "reminder"],
    },
    Route {
        agent: "whatsapp",
        keywords: &["text", "message", "whatsapp"],
    },
];

/// The route for an agent name, if it is keyword-routed.
pub fn route_for(agent: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.agent == agent)
}

/// Dispatches tasks across a fixed registry of agents.
pub struct PeerRouter {
    registry: Arc<AgentRegistry>,
    memory: Arc<SessionMemory>,
    agent_timeout: Option<Duration>,
}

impl PeerRouter {
    pub fn new(registry: Arc<AgentRegistry>, memory: Arc<SessionMemory>) -> Self {
        Self {
            registry,
            memory,
            agent_timeout: None,
        }
    }

    /// Bound every agent's execution; an overrun becomes that agent's failure.
    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = Some(timeout);
        self
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn memory(&self) -> &Arc<SessionMemory> {
        &self.memory
    }

    /// Ordered, deduplicated agents for a task.
    ///
    /// The default responder comes first whenever it is registered, then
    /// keyword-routed agents in table order, then any other registered agent
    /// whose own `can_handle` accepts the task, in registry order.
    pub fn plan(&self, task: &str) -> Vec<Arc<dyn Agent>> {
        let mut selected: Vec<Arc<dyn Agent>> = Vec::new();

        if let Some(default) = self.registry.get(DEFAULT_RESPONDER) {
            selected.push(default);
        }

        for route in ROUTES.iter().filter(|r| r.matches(task)) {
            if let Some(agent) = self.registry.get(route.agent) {
                selected.push(agent);
            }
        }

        for agent in self.registry.iter() {
            let name = agent.name();
            if name == DEFAULT_RESPONDER || route_for(name).is_some() {
                continue;
            }
            if agent.can_handle(task) {
                selected.push(Arc::clone(agent));
            }
        }

        selected
    }

    /// Run a task for a session and collect one result per selected agent.
    ///
    /// Never fails: an agent error or timeout is recorded as that agent's
    /// [`AgentOutput::Failed`] entry and the remaining agents still run.
    pub async fn execute(&self, session_id: &str, task: &str) -> ExecutionResult {
        self.memory
            .log(session_id, format!("planner received: {task}"))
            .await;

        let selected = self.plan(task);
        let names: Vec<&str> = selected.iter().map(|a| a.name()).collect();
        info!(session_id = %session_id, agents = ?names, "Planned task");

        let mut result = ExecutionResult::new();
        for agent in &selected {
            let name = agent.name();
            let output = match self.run_agent(agent.as_ref(), session_id, task).await {
                Ok(output) => {
                    debug!(session_id = %session_id, agent = %name, "Agent finished");
                    output
                }
                Err(e) => {
                    warn!(session_id = %session_id, agent = %name, error = %e, "Agent failed");
                    self.memory
                        .log(session_id, format!("{name} failed: {e}"))
                        .await;
                    AgentOutput::failed(e.to_string())
                }
            };
            result.insert(name, output);
        }

        let summary = serde_json::to_string(&result).unwrap_or_default();
        self.memory
            .log(session_id, format!("planner results: {summary}"))
            .await;

        result
    }

    /// [`execute`](Self::execute) for a [`Task`].
    pub async fn run(&self, task: &Task) -> ExecutionResult {
        self.execute(&task.session_id, &task.text).await
    }

    async fn run_agent(
        &self,
        agent: &dyn Agent,
        session_id: &str,
        task: &str,
    ) -> Result<AgentOutput, AgentError> {
        match self.agent_timeout {
            Some(limit) => tokio::time::timeout(limit, agent.execute(session_id, task))
                .await
                .unwrap_or_else(|_| {
                    Err(AgentError::Timeout {
                        agent: agent.name().to_string(),
                        timeout_secs: limit.as_secs(),
                    })
                }),
            None => agent.execute(session_id, task).await,
        }
    }
}
