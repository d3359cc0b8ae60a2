//! Shared test helpers for agent and router tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use agentdesk_config::AppConfig;
use agentdesk_core::agent::Agent;
use agentdesk_core::error::{AgentError, ProviderError};
use agentdesk_core::message::Message;
use agentdesk_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use agentdesk_core::task::AgentOutput;
use agentdesk_memory::SessionMemory;
use agentdesk_providers::CannedProvider;
use async_trait::async_trait;

use crate::registry::AgentRegistry;

/// The four built-in agents over transient memory and canned replies.
pub fn canned_registry() -> (Arc<SessionMemory>, AgentRegistry) {
    let memory = Arc::new(SessionMemory::transient());
    let registry = crate::default_registry(
        &AppConfig::default(),
        Arc::clone(&memory),
        Arc::new(CannedProvider::new()),
    )
    .unwrap();
    (memory, registry)
}

/// A mock provider that returns a sequence of scripted responses.
///
/// Each call to `complete` returns the next response in the queue.
/// Panics if more calls are made than responses provided.
pub struct SequentialMockProvider {
    responses: Mutex<Vec<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn single_text(text: &str) -> Self {
        Self::new(vec![make_text_response(text)])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        let count = requests.len();

        if count >= responses.len() {
            panic!(
                "SequentialMockProvider: no more responses (call #{}, have {})",
                count,
                responses.len()
            );
        }

        requests.push(request);
        Ok(responses[count].clone())
    }
}

/// A provider that always fails with the given error.
pub struct ErrorProvider(pub ProviderError);

#[async_trait]
impl Provider for ErrorProvider {
    fn name(&self) -> &str {
        "error"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(self.0.clone())
    }
}

/// Create a simple text response.
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// Returns a fixed reply; optionally keyword-triggered.
pub struct StaticAgent {
    name: String,
    reply: String,
    trigger: Option<String>,
}

impl StaticAgent {
    pub fn new(name: &str, reply: &str) -> Self {
        Self {
            name: name.into(),
            reply: reply.into(),
            trigger: None,
        }
    }

    pub fn triggered_by(mut self, keyword: &str) -> Self {
        self.trigger = Some(keyword.to_lowercase());
        self
    }
}

#[async_trait]
impl Agent for StaticAgent {
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        "Returns a fixed reply"
    }
    fn can_handle(&self, task: &str) -> bool {
        self.trigger
            .as_deref()
            .is_some_and(|t| task.to_lowercase().contains(t))
    }
    async fn execute(&self, _session_id: &str, _task: &str) -> Result<AgentOutput, AgentError> {
        Ok(AgentOutput::text(&self.reply))
    }
}

/// Always fails.
pub struct FailingAgent {
    name: String,
}

impl FailingAgent {
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Agent for FailingAgent {
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        "Always fails"
    }
    fn can_handle(&self, _task: &str) -> bool {
        false
    }
    async fn execute(&self, _session_id: &str, _task: &str) -> Result<AgentOutput, AgentError> {
        Err(AgentError::ExecutionFailed {
            agent: self.name.clone(),
            reason: "upstream unavailable".into(),
        })
    }
}

/// Sleeps before answering.
pub struct SlowAgent {
    name: String,
    delay: Duration,
}

impl SlowAgent {
    pub fn new(name: &str, delay: Duration) -> Self {
        Self {
            name: name.into(),
            delay,
        }
    }
}

#[async_trait]
impl Agent for SlowAgent {
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        "Answers after a delay"
    }
    fn can_handle(&self, _task: &str) -> bool {
        false
    }
    async fn execute(&self, _session_id: &str, _task: &str) -> Result<AgentOutput, AgentError> {
        tokio::time::sleep(self.delay).await;
        Ok(AgentOutput::text("finally"))
    }
}
