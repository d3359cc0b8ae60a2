//! Web search responder.

use std::sync::Arc;

use agentdesk_core::agent::Agent;
use agentdesk_core::error::AgentError;
use agentdesk_core::task::AgentOutput;
use agentdesk_memory::SessionMemory;
use async_trait::async_trait;

use super::canned_reply;
use crate::router::{Route, route_for};

pub struct SearchAgent {
    memory: Arc<SessionMemory>,
}

impl SearchAgent {
    pub const NAME: &'static str = "search";

    pub fn new(memory: Arc<SessionMemory>) -> Self {
        Self { memory }
    }

    fn route() -> Option<&'static Route> {
        route_for(Self::NAME)
    }

    /// The answer for a task.
    pub fn answer(task: &str) -> &'static str {
        let lower = task.to_lowercase();
        if lower.contains("weather") && lower.contains("paris") {
            "Weather in Paris is sunny"
        } else if lower.contains("pulp fiction") {
            "Pulp Fiction is playing at 8pm"
        } else {
            "Search results"
        }
    }
}

#[async_trait]
impl Agent for SearchAgent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Looks up weather, showtimes and general web results"
    }

    fn can_handle(&self, task: &str) -> bool {
        Self::route().is_some_and(|r| r.matches(task))
    }

    async fn execute(&self, session_id: &str, task: &str) -> Result<AgentOutput, AgentError> {
        canned_reply(&self.memory, Self::NAME, session_id, task, Self::answer(task)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers() {
        assert_eq!(
            SearchAgent::answer("check weather at Paris"),
            "Weather in Paris is sunny"
        );
        assert_eq!(
            SearchAgent::answer("when does pulp fiction play?"),
            "Pulp Fiction is playing at 8pm"
        );
        assert_eq!(SearchAgent::answer("weather in Oslo"), "Search results");
    }

    #[test]
    fn can_handle_uses_route_keywords() {
        let agent = SearchAgent::new(Arc::new(SessionMemory::transient()));
        assert!(agent.can_handle("Search for cafes"));
        assert!(agent.can_handle("Pulp Fiction tickets"));
        assert!(!agent.can_handle("create an event"));
    }

    #[tokio::test]
    async fn execute_logs_before_and_after() {
        let memory = Arc::new(SessionMemory::transient());
        let agent = SearchAgent::new(Arc::clone(&memory));

        let out = agent.execute("s1", "weather in paris").await.unwrap();
        assert_eq!(out, "Weather in Paris is sunny");

        let log = memory.history("s1").await.unwrap();
        let messages: Vec<&str> = log.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "search: weather in paris",
                "search result: Weather in Paris is sunny"
            ]
        );
    }
}
