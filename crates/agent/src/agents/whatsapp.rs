//! Messaging responder.

use std::sync::Arc;

use agentdesk_core::agent::Agent;
use agentdesk_core::error::AgentError;
use agentdesk_core::task::AgentOutput;
use agentdesk_memory::SessionMemory;
use async_trait::async_trait;

use super::canned_reply;
use crate::router::route_for;

pub struct WhatsAppAgent {
    memory: Arc<SessionMemory>,
}

impl WhatsAppAgent {
    pub const NAME: &'static str = "whatsapp";
    pub const REPLY: &'static str = "Message sent via WhatsApp";

    pub fn new(memory: Arc<SessionMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Agent for WhatsAppAgent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Sends text messages over WhatsApp"
    }

    fn can_handle(&self, task: &str) -> bool {
        route_for(Self::NAME).is_some_and(|r| r.matches(task))
    }

    async fn execute(&self, session_id: &str, task: &str) -> Result<AgentOutput, AgentError> {
        canned_reply(&self.memory, Self::NAME, session_id, task, Self::REPLY).await
    }
}
