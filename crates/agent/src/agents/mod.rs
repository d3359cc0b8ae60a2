//! Concrete agents.
//!
//! `search`, `calendar` and `whatsapp` answer from fixed phrase tables;
//! `llm` asks the injected provider.

pub mod calendar;
pub mod llm;
pub mod search;
pub mod whatsapp;

pub use calendar::CalendarAgent;
pub use llm::LlmAgent;
pub use search::SearchAgent;
pub use whatsapp::WhatsAppAgent;

use agentdesk_core::error::AgentError;
use agentdesk_core::task::AgentOutput;
use agentdesk_memory::SessionMemory;
use tracing::debug;

/// Log the pre/post entries around a canned reply.
pub(crate) async fn canned_reply(
    memory: &SessionMemory,
    agent: &str,
    session_id: &str,
    task: &str,
    reply: &str,
) -> Result<AgentOutput, AgentError> {
    memory.log(session_id, format!("{agent}: {task}")).await;
    debug!(session_id = %session_id, agent = %agent, reply = %reply, "Canned reply");
    memory
        .log(session_id, format!("{agent} result: {reply}"))
        .await;
    Ok(AgentOutput::text(reply))
}
