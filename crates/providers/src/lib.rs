//! LLM provider implementations for AgentDesk.
//!
//! All providers implement the `agentdesk_core::Provider` trait.
//! [`build_from_config`] picks one at startup.

pub mod canned;
pub mod openai_compat;

pub use canned::CannedProvider;
pub use openai_compat::OpenAiCompatProvider;

use std::sync::Arc;
use std::time::Duration;

use agentdesk_config::LlmConfig;
use agentdesk_core::provider::Provider;
use tracing::{info, warn};

/// Build the provider the default responder will use.
///
/// A present API key selects the network provider unless canned replies are
/// forced. Any failure to build the HTTP client degrades to canned replies.
pub fn build_from_config(config: &LlmConfig) -> Arc<dyn Provider> {
    let api_key = match (&config.api_key, config.canned_replies) {
        (Some(key), false) => key,
        (None, _) => {
            info!("No LLM API key configured, using canned replies");
            return Arc::new(CannedProvider::new());
        }
        (Some(_), true) => {
            info!("Canned replies forced by configuration");
            return Arc::new(CannedProvider::new());
        }
    };

    match OpenAiCompatProvider::new(
        "openai",
        &config.api_url,
        api_key,
        Duration::from_secs(config.timeout_secs),
    ) {
        Ok(provider) => {
            info!(model = %config.model, url = %config.api_url, "Using OpenAI-compatible provider");
            Arc::new(provider)
        }
        Err(e) => {
            warn!(error = %e, "Could not build LLM client, falling back to canned replies");
            Arc::new(CannedProvider::new())
        }
    }
}
