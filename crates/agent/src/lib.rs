//! Agents and the planner that routes tasks between them.
//!
//! A task flows through the [`PeerRouter`]:
//!
//! 1. **Receive** the task and log it to session memory
//! 2. **Plan**: the default responder plus every keyword-matched agent
//! 3. **Execute** each selected agent in turn, isolating failures
//! 4. **Aggregate** the results by agent name and log them
//!
//! [`bootstrap`] wires the whole graph from an [`AppConfig`].

pub mod agents;
pub mod registry;
pub mod router;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use agents::{CalendarAgent, LlmAgent, SearchAgent, WhatsAppAgent};
pub use registry::{AgentRegistry, RegistryError};
pub use router::{DEFAULT_RESPONDER, PeerRouter, ROUTES, Route};

use std::sync::Arc;
use std::time::Duration;

use agentdesk_config::AppConfig;
use agentdesk_core::provider::Provider;
use agentdesk_memory::SessionMemory;
use tracing::info;

/// Register the built-in agents: `llm`, `search`, `calendar`, `whatsapp`.
pub fn default_registry(
    config: &AppConfig,
    memory: Arc<SessionMemory>,
    provider: Arc<dyn Provider>,
) -> Result<AgentRegistry, RegistryError> {
    let mut registry = AgentRegistry::new();
    registry.register(Arc::new(LlmAgent::from_config(
        &config.llm,
        provider,
        Arc::clone(&memory),
    )))?;
    registry.register(Arc::new(SearchAgent::new(Arc::clone(&memory))))?;
    registry.register(Arc::new(CalendarAgent::new(Arc::clone(&memory))))?;
    registry.register(Arc::new(WhatsAppAgent::new(memory)))?;

    info!(
        agents = ?registry.names(),
        search_api_key = config.search.api_key.is_some(),
        calendar_oauth = config.calendar.is_complete(),
        "Agents registered"
    );
    Ok(registry)
}

/// Build the memory recorder, provider, registry and router from config.
pub async fn bootstrap(config: &AppConfig) -> Result<PeerRouter, RegistryError> {
    let memory = Arc::new(SessionMemory::from_config(&config.memory).await);
    let provider = agentdesk_providers::build_from_config(&config.llm);
    let registry = default_registry(config, Arc::clone(&memory), provider)?;

    let mut router = PeerRouter::new(Arc::new(registry), memory);
    if let Some(secs) = config.router.agent_timeout_secs {
        router = router.with_agent_timeout(Duration::from_secs(secs));
    }
    Ok(router)
}
