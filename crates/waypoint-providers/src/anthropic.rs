use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use waypoint_core::{
    Error, GenerateRequest, LlmResponse, ModelProvider, ReasoningConfig, Result, Role, Settings,
};

/// Anthropic Messages API endpoint URL.
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Default model for Anthropic.
const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
/// Env var key for the Anthropic API key.
const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
/// Completion token cap without extended thinking.
const MAX_TOKENS: u32 = 2000;
/// Smallest thinking budget the API accepts.
const MIN_THINKING_BUDGET: u32 = 1024;

/// Anthropic Claude provider with extended thinking support.
pub struct AnthropicProvider {
    /// HTTP client for API requests.
    client: Client,
    /// Anthropic API key; `None` leaves the provider unavailable.
    api_key: Option<String>,
}

impl AnthropicProvider {
    /// Creates a provider with an explicit (possibly absent) API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::default(),
            api_key,
        }
    }

    /// Creates a provider from settings, resolving the key through config
    /// and environment.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.get_api_key("anthropic"))
    }

    /// Thinking budget from the request, when at or above the API minimum.
    fn resolve_thinking(reasoning: Option<&ReasoningConfig>) -> Option<u32> {
        match reasoning {
            Some(ReasoningConfig::ThinkingTokens(budget)) if *budget >= MIN_THINKING_BUDGET => {
                Some(*budget)
            }
            _ => None,
        }
    }
}

/// Request payload for the Messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    /// Model id.
    model: String,
    /// Completion token cap; raised when thinking is enabled.
    max_tokens: u32,
    /// System prompt.
    system: String,
    /// Conversation turns.
    messages: Vec<ApiMessage>,
    /// Extended thinking settings, when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking: Option<ThinkingSetting>,
}

/// One conversation turn.
#[derive(Debug, Serialize)]
struct ApiMessage {
    /// Message role ("user" or "assistant").
    role: &'static str,
    /// Message text.
    content: String,
}

/// Extended thinking settings.
#[derive(Debug, Serialize)]
struct ThinkingSetting {
    /// Always "enabled" when present.
    #[serde(rename = "type")]
    kind: &'static str,
    /// Thinking token budget.
    budget_tokens: u32,
}

/// Response payload from the Messages API.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    /// Content blocks; thinking blocks precede the text block.
    content: Vec<ContentBlock>,
    /// Token accounting.
    usage: MessagesUsage,
}

/// One response content block.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    /// Block type ("thinking" or "text").
    #[serde(rename = "type")]
    kind: String,
    /// Text payload for text blocks.
    #[serde(default)]
    text: Option<String>,
}

/// Token usage reported by the Messages API.
#[derive(Debug, Deserialize)]
struct MessagesUsage {
    /// Prompt tokens billed.
    input_tokens: Option<u64>,
    /// Completion tokens billed.
    output_tokens: Option<u64>,
}

#[async_trait]
impl ModelProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<LlmResponse> {
        let Some(api_key) = &self.api_key else {
            return Err(Error::MissingApiKey(ENV_ANTHROPIC_API_KEY.to_owned()));
        };

        let model_id = request
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_owned());

        let budget = Self::resolve_thinking(request.reasoning.as_ref());
        // Thinking shares the completion cap, so the cap grows with the
        // budget to leave room for the visible response.
        let max_tokens = budget.map_or(MAX_TOKENS, |budget| MAX_TOKENS.max(budget + 4000));

        let payload = MessagesRequest {
            model: model_id.clone(),
            max_tokens,
            system: request.system_prompt.clone(),
            messages: request
                .messages
                .iter()
                .map(|message| ApiMessage {
                    role: match message.role {
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    content: message.content.clone(),
                })
                .collect(),
            thinking: budget.map(|budget_tokens| ThinkingSetting {
                kind: "enabled",
                budget_tokens,
            }),
        };

        let start = Instant::now();
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|error| Error::Provider(format!("Anthropic request failed: {error}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Anthropic API error {status}: {error_text}"
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|error| Error::InvalidResponse(format!("Anthropic: {error}")))?;
        let latency_ms = start.elapsed().as_millis() as u64;

        // Skip thinking blocks; the answer is the first text block.
        let text = parsed
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.clone())
            .unwrap_or_default();

        Ok(LlmResponse {
            text,
            provider: "anthropic".to_owned(),
            model: model_id,
            latency_ms,
            input_tokens: parsed.usage.input_tokens,
            output_tokens: parsed.usage.output_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::ChatMessage;

    #[tokio::test]
    async fn unavailable_without_an_api_key() {
        let provider = AnthropicProvider::new(None);
        assert!(!provider.is_available().await);

        let request = GenerateRequest::new("system", vec![ChatMessage::user("q")]);
        assert!(matches!(
            provider.generate(&request).await,
            Err(Error::MissingApiKey(_))
        ));
    }

    #[test]
    fn thinking_requires_the_api_minimum() {
        assert_eq!(
            AnthropicProvider::resolve_thinking(Some(&ReasoningConfig::ThinkingTokens(4096))),
            Some(4096)
        );
        assert_eq!(
            AnthropicProvider::resolve_thinking(Some(&ReasoningConfig::ThinkingTokens(512))),
            None
        );
        assert_eq!(AnthropicProvider::resolve_thinking(None), None);
        // Other providers' knobs never enable thinking here.
        assert_eq!(
            AnthropicProvider::resolve_thinking(Some(&ReasoningConfig::ThinkingBudget(4096))),
            None
        );
    }

    #[test]
    fn text_extraction_skips_thinking_blocks() {
        let response = MessagesResponse {
            content: vec![
                ContentBlock {
                    kind: "thinking".to_owned(),
                    text: Some("internal".to_owned()),
                },
                ContentBlock {
                    kind: "text".to_owned(),
                    text: Some("the answer".to_owned()),
                },
            ],
            usage: MessagesUsage {
                input_tokens: Some(10),
                output_tokens: Some(20),
            },
        };
        let text = response
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.clone());
        assert_eq!(text.as_deref(), Some("the answer"));
    }
}
