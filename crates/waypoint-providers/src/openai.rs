use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use waypoint_core::{
    Error, GenerateRequest, LlmResponse, ModelProvider, ReasoningConfig, Result, Settings,
};

use crate::models::{ReasoningParam, get_model_info};

/// OpenAI Responses API endpoint URL.
const OPENAI_API_URL: &str = "https://api.openai.com/v1/responses";
/// Default model for OpenAI.
const DEFAULT_MODEL: &str = "gpt-5.2";
/// Env var key for the OpenAI API key.
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Completion token cap per request.
const MAX_OUTPUT_TOKENS: u32 = 2000;

/// OpenAI provider using the Responses API.
pub struct OpenAiProvider {
    /// HTTP client for API requests.
    client: Client,
    /// OpenAI API key; `None` leaves the provider unavailable.
    api_key: Option<String>,
}

impl OpenAiProvider {
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
        Self::new(settings.get_api_key("openai"))
    }

    /// Builds the Responses API input list: system first, then history.
    fn build_input(request: &GenerateRequest) -> Vec<InputMessage> {
        let mut input = vec![InputMessage {
            role: "system".to_owned(),
            content: vec![InputContent {
                kind: "input_text",
                text: request.system_prompt.clone(),
            }],
        }];
        for message in &request.messages {
            let role = match message.role {
                waypoint_core::Role::User => "user",
                waypoint_core::Role::Assistant => "assistant",
            };
            input.push(InputMessage {
                role: role.to_owned(),
                content: vec![InputContent {
                    kind: "input_text",
                    text: message.content.clone(),
                }],
            });
        }
        input
    }

    /// Resolves the effort setting for models that accept one.
    ///
    /// The catalog decides whether the model takes an effort parameter;
    /// "none" disables it entirely.
    fn resolve_effort(model_id: &str, reasoning: Option<&ReasoningConfig>) -> Option<String> {
        let info = get_model_info(model_id)?;
        if info.reasoning_param != Some(ReasoningParam::Effort) {
            return None;
        }
        let effort = match reasoning {
            Some(ReasoningConfig::Effort(value)) => value.clone(),
            _ => "high".to_owned(),
        };
        (effort != "none").then_some(effort)
    }
}

/// Request payload for the Responses API.
#[derive(Debug, Serialize)]
struct ResponsesRequest {
    /// Model id.
    model: String,
    /// System prompt and conversation turns.
    input: Vec<InputMessage>,
    /// Completion token cap.
    max_output_tokens: u32,
    /// Reasoning settings, for models that accept them.
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<ReasoningSetting>,
}

/// One input message.
#[derive(Debug, Serialize)]
struct InputMessage {
    /// Message role.
    role: String,
    /// Typed content blocks.
    content: Vec<InputContent>,
}

/// One input content block.
#[derive(Debug, Serialize)]
struct InputContent {
    /// Block type tag.
    #[serde(rename = "type")]
    kind: &'static str,
    /// Block text.
    text: String,
}

/// Reasoning settings payload.
#[derive(Debug, Serialize)]
struct ReasoningSetting {
    /// Effort level.
    effort: String,
}

/// Response payload from the Responses API.
#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    /// Convenience concatenation of output text, when provided.
    #[serde(default)]
    output_text: Option<String>,
    /// Output blocks, walked when `output_text` is absent.
    #[serde(default)]
    output: Vec<OutputBlock>,
    /// Token accounting, when provided.
    usage: Option<ResponsesUsage>,
}

/// One output block.
#[derive(Debug, Deserialize)]
struct OutputBlock {
    /// Content items within the block.
    #[serde(default)]
    content: Vec<OutputContent>,
}

/// One output content item.
#[derive(Debug, Deserialize)]
struct OutputContent {
    /// Text payload, when the item carries one.
    #[serde(default)]
    text: Option<String>,
}

/// Token usage reported by the Responses API.
#[derive(Debug, Deserialize)]
struct ResponsesUsage {
    /// Prompt tokens billed.
    input_tokens: Option<u64>,
    /// Completion tokens billed.
    output_tokens: Option<u64>,
}

impl ResponsesResponse {
    /// Extract the response text: `output_text` first, otherwise the last
    /// non-empty text item found walking the output blocks.
    fn text(&self) -> String {
        if let Some(text) = &self.output_text
            && !text.trim().is_empty()
        {
            return text.trim().to_owned();
        }
        let mut found = String::new();
        for block in &self.output {
            for item in &block.content {
                if let Some(text) = &item.text
                    && !text.trim().is_empty()
                {
                    found = text.trim().to_owned();
                }
            }
        }
        found
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<LlmResponse> {
        let Some(api_key) = &self.api_key else {
            return Err(Error::MissingApiKey(ENV_OPENAI_API_KEY.to_owned()));
        };

        let model_id = request
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_owned());
        let reasoning = Self::resolve_effort(&model_id, request.reasoning.as_ref())
            .map(|effort| ReasoningSetting { effort });

        let payload = ResponsesRequest {
            model: model_id.clone(),
            input: Self::build_input(request),
            max_output_tokens: MAX_OUTPUT_TOKENS,
            reasoning,
        };

        let start = Instant::now();
        let response = self
            .client
            .post(OPENAI_API_URL)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&payload)
            .send()
            .await
            .map_err(|error| Error::Provider(format!("OpenAI request failed: {error}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "OpenAI API error {status}: {error_text}"
            )));
        }

        let parsed: ResponsesResponse = response
            .json()
            .await
            .map_err(|error| Error::InvalidResponse(format!("OpenAI: {error}")))?;
        let latency_ms = start.elapsed().as_millis() as u64;

        Ok(LlmResponse {
            text: parsed.text(),
            provider: "openai".to_owned(),
            model: model_id,
            latency_ms,
            input_tokens: parsed.usage.as_ref().and_then(|usage| usage.input_tokens),
            output_tokens: parsed.usage.as_ref().and_then(|usage| usage.output_tokens),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::ChatMessage;

    #[tokio::test]
    async fn unavailable_without_an_api_key() {
        let provider = OpenAiProvider::new(None);
        assert!(!provider.is_available().await);

        let request = GenerateRequest::new("system", vec![ChatMessage::user("q")]);
        let result = provider.generate(&request).await;
        assert!(matches!(result, Err(Error::MissingApiKey(_))));
    }

    #[test]
    fn input_starts_with_the_system_prompt() {
        let request = GenerateRequest::new(
            "you are an expert",
            vec![ChatMessage::user("first"), ChatMessage::assistant("second")],
        );
        let input = OpenAiProvider::build_input(&request);
        assert_eq!(input.len(), 3);
        assert_eq!(input[0].role, "system");
        assert_eq!(input[1].role, "user");
        assert_eq!(input[2].role, "assistant");
        assert_eq!(input[0].content[0].text, "you are an expert");
    }

    #[test]
    fn effort_defaults_high_and_none_disables() {
        assert_eq!(
            OpenAiProvider::resolve_effort("gpt-5.2", None),
            Some("high".to_owned())
        );
        assert_eq!(
            OpenAiProvider::resolve_effort(
                "gpt-5.2",
                Some(&ReasoningConfig::Effort("low".to_owned()))
            ),
            Some("low".to_owned())
        );
        assert_eq!(
            OpenAiProvider::resolve_effort(
                "gpt-5.2",
                Some(&ReasoningConfig::Effort("none".to_owned()))
            ),
            None
        );
        // Models without the effort knob never get one.
        assert_eq!(OpenAiProvider::resolve_effort("gpt-4.1", None), None);
    }

    #[test]
    fn response_text_prefers_output_text() {
        let response = ResponsesResponse {
            output_text: Some("  direct  ".to_owned()),
            output: vec![OutputBlock {
                content: vec![OutputContent {
                    text: Some("walked".to_owned()),
                }],
            }],
            usage: None,
        };
        assert_eq!(response.text(), "direct");
    }

    #[test]
    fn response_text_walks_blocks_when_needed() {
        let response = ResponsesResponse {
            output_text: None,
            output: vec![
                OutputBlock {
                    content: vec![OutputContent { text: None }],
                },
                OutputBlock {
                    content: vec![OutputContent {
                        text: Some("from a block".to_owned()),
                    }],
                },
            ],
            usage: None,
        };
        assert_eq!(response.text(), "from a block");
    }
}
