//! Calendar responder.

use std::sync::Arc;

use agentdesk_core::agent::Agent;
use agentdesk_core::error::AgentError;
use agentdesk_core::task::AgentOutput;
use agentdesk_memory::SessionMemory;
use async_trait::async_trait;

use super::canned_reply;
use crate::router::route_for;

pub struct CalendarAgent {
    memory: Arc<SessionMemory>,
}

impl CalendarAgent {
    pub const NAME: &'static str = "calendar";
    pub const REPLY: &'static str = "Event created in calendar";

    pub fn new(memory: Arc<SessionMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Agent for CalendarAgent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Creates calendar events and reminders"
    }

    fn can_handle(&self, task: &str) -> bool {
        route_for(Self::NAME).is_some_and(|r| r.matches(task))
    }

    async fn execute(&self, session_id: &str, task: &str) -> Result<AgentOutput, AgentError> {
        canned_reply(&self.memory, Self::NAME, session_id, task, Self::REPLY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_event() {
        let memory = Arc::new(SessionMemory::transient());
        let agent = CalendarAgent::new(Arc::clone(&memory));

        assert!(agent.can_handle("set a Reminder for 5pm"));
        assert!(!agent.can_handle("what's the weather"));

        let out = agent.execute("s1", "add dentist to my calendar").await.unwrap();
        assert_eq!(out, "Event created in calendar");
        assert_eq!(memory.history("s1").await.unwrap().len(), 2);
    }
}
