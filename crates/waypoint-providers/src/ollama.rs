use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use waypoint_core::{
    Error, GenerateRequest, LlmResponse, ModelProvider, Result, Role, Settings,
};

/// Timeout for the availability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);
/// Timeout for chat generation against a local runtime.
const CHAT_TIMEOUT: Duration = Duration::from_secs(120);

/// Local model provider backed by an Ollama runtime.
pub struct OllamaProvider {
    /// HTTP client for API requests.
    client: Client,
    /// Base URL of the Ollama HTTP API.
    base_url: String,
    /// Default chat model name.
    model: String,
}

impl OllamaProvider {
    /// Creates a provider for the given runtime URL and model.
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: Client::default(),
            base_url,
            model,
        }
    }

    /// Creates a provider from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.ollama.base_url.clone(),
            settings.ollama.model.clone(),
        )
    }
}

/// Request payload for the Ollama chat API.
#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    /// Model name.
    model: String,
    /// System prompt followed by the conversation.
    messages: Vec<OllamaMessage>,
    /// Always `false`; responses are read in one piece.
    stream: bool,
}

/// One chat message.
#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    /// Message role.
    role: String,
    /// Message text.
    content: String,
}

/// Response payload from the Ollama chat API.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    /// Generated message.
    message: OllamaMessage,
    /// Prompt tokens evaluated, when reported.
    #[serde(default)]
    prompt_eval_count: Option<u64>,
    /// Completion tokens generated, when reported.
    #[serde(default)]
    eval_count: Option<u64>,
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<LlmResponse> {
        let model_id = request.model.clone().unwrap_or_else(|| self.model.clone());

        let mut messages = vec![OllamaMessage {
            role: "system".to_owned(),
            content: request.system_prompt.clone(),
        }];
        for message in &request.messages {
            messages.push(OllamaMessage {
                role: match message.role {
                    Role::User => "user".to_owned(),
                    Role::Assistant => "assistant".to_owned(),
                },
                content: message.content.clone(),
            });
        }

        let payload = OllamaChatRequest {
            model: model_id.clone(),
            messages,
            stream: false,
        };

        let start = Instant::now();
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(CHAT_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|error| Error::Provider(format!("Ollama request failed: {error}")))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Ollama returned error: {}",
                response.status()
            )));
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|error| Error::InvalidResponse(format!("Ollama: {error}")))?;
        let latency_ms = start.elapsed().as_millis() as u64;

        Ok(LlmResponse {
            text: parsed.message.content,
            provider: "ollama".to_owned(),
            model: model_id,
            latency_ms,
            input_tokens: parsed.prompt_eval_count,
            output_tokens: parsed.eval_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_comes_from_configuration() {
        let provider = OllamaProvider::new(
            "http://localhost:11434".to_owned(),
            "llama3.2".to_owned(),
        );
        assert_eq!(provider.name(), "ollama");
        assert_eq!(provider.default_model(), "llama3.2");
    }

    #[tokio::test]
    async fn unreachable_runtime_is_unavailable() {
        // Nothing listens on this port; the probe must come back false
        // rather than hang or error.
        let provider =
            OllamaProvider::new("http://127.0.0.1:1".to_owned(), "llama3.2".to_owned());
        assert!(!provider.is_available().await);
    }
}
