//! The default responder: forwards the task to an LLM provider.

use std::sync::Arc;

use agentdesk_config::LlmConfig;
use agentdesk_core::agent::Agent;
use agentdesk_core::error::AgentError;
use agentdesk_core::message::Message;
use agentdesk_core::provider::{Provider, ProviderRequest};
use agentdesk_core::task::AgentOutput;
use agentdesk_memory::SessionMemory;
use async_trait::async_trait;
use tracing::debug;

use crate::router::DEFAULT_RESPONDER;

pub struct LlmAgent {
    provider: Arc<dyn Provider>,
    memory: Arc<SessionMemory>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl LlmAgent {
    pub fn new(provider: Arc<dyn Provider>, memory: Arc<SessionMemory>) -> Self {
        Self::from_config(&LlmConfig::default(), provider, memory)
    }

    pub fn from_config(
        config: &LlmConfig,
        provider: Arc<dyn Provider>,
        memory: Arc<SessionMemory>,
    ) -> Self {
        Self {
            provider,
            memory,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: Some(config.max_tokens),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

#[async_trait]
impl Agent for LlmAgent {
    fn name(&self) -> &str {
        DEFAULT_RESPONDER
    }

    fn description(&self) -> &str {
        "Answers free-form questions with a language model"
    }

    /// Never keyword-selected; the router adds it to every plan.
    fn can_handle(&self, _task: &str) -> bool {
        false
    }

    async fn execute(&self, session_id: &str, task: &str) -> Result<AgentOutput, AgentError> {
        self.memory
            .log(session_id, format!("LLM input: {task}"))
            .await;

        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![Message::user(task)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|source| AgentError::Provider {
                agent: DEFAULT_RESPONDER.to_string(),
                source,
            })?;

        let content = response.message.content.trim().to_string();
        if content.is_empty() {
            return Err(AgentError::EmptyResult {
                agent: DEFAULT_RESPONDER.to_string(),
            });
        }

        debug!(session_id = %session_id, model = %response.model, "LLM replied");
        self.memory
            .log(session_id, format!("LLM output: {content}"))
            .await;

        Ok(AgentOutput::Text(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ErrorProvider, SequentialMockProvider};
    use agentdesk_core::error::ProviderError;
    use agentdesk_providers::CannedProvider;

    fn memory() -> Arc<SessionMemory> {
        Arc::new(SessionMemory::transient())
    }

    #[tokio::test]
    async fn canned_greeting() {
        let memory = memory();
        let agent = LlmAgent::new(Arc::new(CannedProvider::new()), Arc::clone(&memory));

        let out = agent.execute("s1", "how are you today?").await.unwrap();
        assert!(out.as_text().unwrap().contains("great"));
        assert_eq!(agent.provider_name(), "canned");

        let log = memory.history("s1").await.unwrap();
        assert_eq!(log[0].message, "LLM input: how are you today?");
        assert!(log[1].message.starts_with("LLM output: I'm just"));
    }

    #[tokio::test]
    async fn forwards_provider_reply() {
        let provider = Arc::new(SequentialMockProvider::single_text("  Paris is in France.  "));
        let agent = LlmAgent::new(provider.clone(), memory());

        let out = agent.execute("s1", "where is paris?").await.unwrap();
        assert_eq!(out, "Paris is in France.");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn config_sets_request_parameters() {
        let provider = Arc::new(SequentialMockProvider::single_text("ok"));
        let config = LlmConfig {
            model: "gpt-4o-mini".into(),
            temperature: 0.1,
            max_tokens: 64,
            ..LlmConfig::default()
        };
        let agent = LlmAgent::from_config(&config, provider.clone(), memory());
        agent.execute("s1", "hi").await.unwrap();

        let request = provider.last_request().unwrap();
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_tokens, Some(64));
        assert_eq!(request.last_user_content(), Some("hi"));
    }

    #[tokio::test]
    async fn provider_error_names_the_agent() {
        let provider = Arc::new(ErrorProvider(ProviderError::Timeout("30s".into())));
        let agent = LlmAgent::new(provider, memory());

        let err = agent.execute("s1", "hello").await.unwrap_err();
        assert_eq!(err.agent(), "llm");
        assert!(matches!(
            err,
            AgentError::Provider {
                source: ProviderError::Timeout(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn blank_reply_is_an_error() {
        let provider = Arc::new(SequentialMockProvider::single_text("   "));
        let agent = LlmAgent::new(provider, memory());
        let err = agent.execute("s1", "hello").await.unwrap_err();
        assert!(matches!(err, AgentError::EmptyResult { .. }));
    }

    #[test]
    fn never_keyword_selected() {
        let agent = LlmAgent::new(Arc::new(CannedProvider::new()), memory());
        assert!(!agent.can_handle("anything at all"));
        assert_eq!(agent.name(), "llm");
    }
}
