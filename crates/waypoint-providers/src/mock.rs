//! Mock provider for testing grounded chat flows.
//!
//! Canned responses are keyed by substrings of the latest user message, so
//! registry selection, budget accounting, and evaluation runs can be
//! exercised end-to-end without real API calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use waypoint_core::{GenerateRequest, LlmResponse, ModelProvider, Result};

/// Mock provider returning pre-defined responses.
#[derive(Clone, Default)]
pub struct MockProvider {
    /// Canned responses keyed by message pattern.
    responses: Arc<Mutex<HashMap<String, String>>>,
    /// Response used when no pattern matches.
    default_response: Arc<Mutex<Option<String>>>,
    /// System prompts seen by `generate`, for assertions.
    prompt_history: Arc<Mutex<Vec<String>>>,
    /// Whether the provider reports itself available.
    available: bool,
}

impl MockProvider {
    /// Creates an available mock provider with no canned responses.
    pub fn new() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    /// Creates a mock provider that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    /// Adds a canned response for messages containing `pattern`.
    #[must_use]
    pub fn with_response(self, pattern: impl Into<String>, response: impl Into<String>) -> Self {
        {
            let mut responses = self
                .responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            responses.insert(pattern.into(), response.into());
        }
        self
    }

    /// Sets the response for unmatched messages.
    #[must_use]
    pub fn with_default_response(self, response: impl Into<String>) -> Self {
        {
            let mut default = self
                .default_response
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *default = Some(response.into());
        }
        self
    }

    /// System prompts seen so far.
    pub fn prompt_history(&self) -> Vec<String> {
        self.prompt_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `generate` calls made.
    pub fn call_count(&self) -> usize {
        self.prompt_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Find a canned response for the latest user message.
    fn find_response(&self, message: &str) -> Option<String> {
        let responses = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(response) = responses.get(message) {
            return Some(response.clone());
        }
        responses
            .iter()
            .find(|(pattern, _)| message.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<LlmResponse> {
        {
            let mut history = self
                .prompt_history
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            history.push(request.system_prompt.clone());
        }

        let last_message = request
            .messages
            .last()
            .map(|message| message.content.as_str())
            .unwrap_or_default();

        let text = self.find_response(last_message).unwrap_or_else(|| {
            let default = self
                .default_response
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            default
                .clone()
                .unwrap_or_else(|| format!("Mock response for: {last_message}"))
        });

        Ok(LlmResponse {
            input_tokens: Some(request.system_prompt.len() as u64 / 4),
            output_tokens: Some(text.len() as u64 / 4),
            text,
            provider: "mock".to_owned(),
            model: request
                .model
                .clone()
                .unwrap_or_else(|| "mock-model".to_owned()),
            latency_ms: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::ChatMessage;

    #[tokio::test]
    async fn substring_patterns_match() {
        let provider = MockProvider::new().with_response("L2", "You are partially automated.");
        let request = GenerateRequest::new(
            "system",
            vec![ChatMessage::user("What does L2 mean for me?")],
        );

        let response = provider.generate(&request).await.expect("generate");
        assert_eq!(response.text, "You are partially automated.");
        assert_eq!(response.provider, "mock");
    }

    #[tokio::test]
    async fn unmatched_messages_use_the_default() {
        let provider = MockProvider::new().with_default_response("canned");
        let request = GenerateRequest::new("system", vec![ChatMessage::user("anything")]);

        let response = provider.generate(&request).await.expect("generate");
        assert_eq!(response.text, "canned");
    }

    #[tokio::test]
    async fn prompt_history_records_system_prompts() {
        let provider = MockProvider::new();
        let request =
            GenerateRequest::new("grounded prompt", vec![ChatMessage::user("question")]);
        provider.generate(&request).await.expect("generate");

        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.prompt_history(), vec!["grounded prompt"]);
    }

    #[tokio::test]
    async fn availability_is_configurable() {
        assert!(MockProvider::new().is_available().await);
        assert!(!MockProvider::unavailable().is_available().await);
    }
}
