use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use waypoint_core::{
    Error, GenerateRequest, LlmResponse, ModelProvider, ReasoningConfig, Result, Role, Settings,
};

use crate::models::{ReasoningParam, get_model_info};

/// Google Generative AI endpoint base URL.
const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Default model for Google.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Env var key for the Google API key.
const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

/// Google Gemini provider with thinking config support.
pub struct GoogleProvider {
    /// HTTP client for API requests.
    client: Client,
    /// Google API key; `None` leaves the provider unavailable.
    api_key: Option<String>,
}

impl GoogleProvider {
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
        Self::new(settings.get_api_key("google"))
    }

    /// Thinking config for the model, when the catalog says it takes one.
    fn resolve_thinking(
        model_id: &str,
        reasoning: Option<&ReasoningConfig>,
    ) -> Option<ThinkingConfig> {
        let info = get_model_info(model_id)?;
        match (info.reasoning_param?, reasoning?) {
            (ReasoningParam::ThinkingBudget, ReasoningConfig::ThinkingBudget(budget)) => {
                Some(ThinkingConfig {
                    thinking_budget: Some(*budget),
                    thinking_level: None,
                })
            }
            (ReasoningParam::ThinkingLevel, ReasoningConfig::ThinkingLevel(level)) => {
                Some(ThinkingConfig {
                    thinking_budget: None,
                    thinking_level: Some(level.to_uppercase()),
                })
            }
            _ => None,
        }
    }
}

/// Request payload for `generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    /// System prompt.
    system_instruction: Content,
    /// Conversation turns.
    contents: Vec<Content>,
    /// Generation settings, when thinking is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// A content entry: role plus text parts.
#[derive(Debug, Serialize, Deserialize)]
struct Content {
    /// Role ("user" or "model"); absent on system instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    /// Text parts.
    parts: Vec<Part>,
}

/// One text part.
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    /// Part text.
    text: String,
}

/// Generation settings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    /// Thinking settings.
    thinking_config: ThinkingConfig,
}

/// Thinking settings: exactly one knob applies per model family.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    /// Token budget (`-1` = dynamic), for budget-style models.
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_budget: Option<i64>,
    /// Named level, for level-style models.
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_level: Option<String>,
}

/// Response payload from `generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    /// Generated candidates.
    #[serde(default)]
    candidates: Vec<Candidate>,
    /// Token accounting, when provided.
    usage_metadata: Option<UsageMetadata>,
}

/// One generated candidate.
#[derive(Debug, Deserialize)]
struct Candidate {
    /// Candidate content.
    content: Content,
}

/// Token usage reported by the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    /// Prompt tokens billed.
    prompt_token_count: Option<u64>,
    /// Completion tokens billed.
    candidates_token_count: Option<u64>,
}

#[async_trait]
impl ModelProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<LlmResponse> {
        let Some(api_key) = &self.api_key else {
            return Err(Error::MissingApiKey(ENV_GOOGLE_API_KEY.to_owned()));
        };

        let model_id = request
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_owned());

        let contents = request
            .messages
            .iter()
            .map(|message| Content {
                role: Some(
                    match message.role {
                        Role::User => "user",
                        Role::Assistant => "model",
                    }
                    .to_owned(),
                ),
                parts: vec![Part {
                    text: message.content.clone(),
                }],
            })
            .collect();

        let payload = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: request.system_prompt.clone(),
                }],
            },
            contents,
            generation_config: Self::resolve_thinking(&model_id, request.reasoning.as_ref())
                .map(|thinking_config| GenerationConfig { thinking_config }),
        };

        let url = format!("{GOOGLE_API_BASE}/{model_id}:generateContent");
        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| Error::Provider(format!("Google request failed: {error}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Google API error {status}: {error_text}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|error| Error::InvalidResponse(format!("Google: {error}")))?;
        let latency_ms = start.elapsed().as_millis() as u64;

        let text = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| Error::InvalidResponse("No candidates from Google".to_owned()))?;

        Ok(LlmResponse {
            text,
            provider: "google".to_owned(),
            model: model_id,
            latency_ms,
            input_tokens: parsed
                .usage_metadata
                .as_ref()
                .and_then(|usage| usage.prompt_token_count),
            output_tokens: parsed
                .usage_metadata
                .as_ref()
                .and_then(|usage| usage.candidates_token_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::ChatMessage;

    #[tokio::test]
    async fn unavailable_without_an_api_key() {
        let provider = GoogleProvider::new(None);
        assert!(!provider.is_available().await);

        let request = GenerateRequest::new("system", vec![ChatMessage::user("q")]);
        assert!(matches!(
            provider.generate(&request).await,
            Err(Error::MissingApiKey(_))
        ));
    }

    #[test]
    fn budget_models_take_budgets_and_level_models_take_levels() {
        let budget = GoogleProvider::resolve_thinking(
            "gemini-2.5-flash",
            Some(&ReasoningConfig::ThinkingBudget(4096)),
        )
        .expect("budget config");
        assert_eq!(budget.thinking_budget, Some(4096));
        assert_eq!(budget.thinking_level, None);

        let level = GoogleProvider::resolve_thinking(
            "gemini-3-pro-preview",
            Some(&ReasoningConfig::ThinkingLevel("high".to_owned())),
        )
        .expect("level config");
        assert_eq!(level.thinking_budget, None);
        assert_eq!(level.thinking_level.as_deref(), Some("HIGH"));
    }

    #[test]
    fn mismatched_knobs_produce_no_config() {
        assert!(
            GoogleProvider::resolve_thinking(
                "gemini-2.5-flash",
                Some(&ReasoningConfig::ThinkingLevel("high".to_owned())),
            )
            .is_none()
        );
        assert!(GoogleProvider::resolve_thinking("gemini-2.5-flash", None).is_none());
        assert!(
            GoogleProvider::resolve_thinking(
                "unknown-model",
                Some(&ReasoningConfig::ThinkingBudget(1024)),
            )
            .is_none()
        );
    }
}
