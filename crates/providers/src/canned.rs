//! Deterministic provider that never touches the network.
//!
//! Used when no API key is configured and in tests.

use agentdesk_core::error::ProviderError;
use agentdesk_core::message::Message;
use agentdesk_core::provider::*;
use async_trait::async_trait;

/// Replies from a fixed phrase table, echoing anything it doesn't recognize.
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedProvider;

impl CannedProvider {
    pub fn new() -> Self {
        Self
    }

    /// The canned reply for a prompt.
    pub fn reply_for(prompt: &str) -> String {
        let lower = prompt.to_lowercase();
        if lower.contains("how are") {
            "I'm just a bunch of code, but I'm doing great!".to_string()
        } else if lower.contains("3+5") {
            "3 + 5 equals 8".to_string()
        } else {
            format!("Echo: {prompt}")
        }
    }
}

#[async_trait]
impl Provider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let prompt = request.last_user_content().unwrap_or_default();
        Ok(ProviderResponse {
            message: Message::assistant(Self::reply_for(prompt)),
            usage: None,
            model: request.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> ProviderRequest {
        ProviderRequest {
            model: "gpt-4".into(),
            messages: vec![Message::user(text)],
            temperature: 0.7,
            max_tokens: Some(64),
        }
    }

    #[test]
    fn greeting_reply() {
        let reply = CannedProvider::reply_for("How are you today?");
        assert!(reply.contains("great"));
    }

    #[test]
    fn arithmetic_reply() {
        assert!(CannedProvider::reply_for("tell me what makes 3+5=?").starts_with("3 + 5"));
    }

    #[test]
    fn echo_fallback_keeps_original_case() {
        assert_eq!(CannedProvider::reply_for("Hello World"), "Echo: Hello World");
    }

    #[tokio::test]
    async fn complete_uses_last_user_message() {
        let provider = CannedProvider::new();
        let response = provider.complete(request("how are things")).await.unwrap();
        assert_eq!(
            response.message.content,
            "I'm just a bunch of code, but I'm doing great!"
        );
        assert_eq!(response.model, "gpt-4");
        assert!(provider.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn empty_conversation_echoes_nothing() {
        let provider = CannedProvider::new();
        let mut req = request("ignored");
        req.messages.clear();
        let response = provider.complete(req).await.unwrap();
        assert_eq!(response.message.content, "Echo: ");
    }
}
