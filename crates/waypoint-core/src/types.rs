use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End-user message.
    User,
    /// Prior model reply in the conversation.
    Assistant,
}

/// A single turn in a conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who authored the message.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a user message.
    pub fn user<T: Into<String>>(content: T) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant<T: Into<String>>(content: T) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Provider-specific reasoning/thinking settings.
///
/// Each provider family exposes a different knob; the model catalog decides
/// which variant applies to a given model id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningConfig {
    /// Reasoning effort level ("low", "medium", "high", ...).
    Effort(String),
    /// Extended thinking token budget; budgets below the provider minimum
    /// disable thinking.
    ThinkingTokens(u32),
    /// Thinking budget in tokens, where `-1` requests dynamic budgeting.
    ThinkingBudget(i64),
    /// Named thinking level ("minimal", "low", "medium", "high").
    ThinkingLevel(String),
}

/// A generation request handed to a model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// System-level instructions, including any grounding context.
    pub system_prompt: String,
    /// Conversation history, oldest first, ending with the current user turn.
    pub messages: Vec<ChatMessage>,
    /// Override for the provider's default model.
    pub model: Option<String>,
    /// Optional reasoning settings for models that support them.
    pub reasoning: Option<ReasoningConfig>,
}

impl GenerateRequest {
    /// Creates a request with no model override or reasoning settings.
    pub fn new<T: Into<String>>(system_prompt: T, messages: Vec<ChatMessage>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages,
            model: None,
            reasoning: None,
        }
    }

    /// Sets a model override.
    #[must_use]
    pub fn with_model<T: Into<String>>(mut self, model: T) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets reasoning options.
    #[must_use]
    pub fn with_reasoning(mut self, reasoning: ReasoningConfig) -> Self {
        self.reasoning = Some(reasoning);
        self
    }
}

/// Response from a model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Generated text.
    pub text: String,
    /// Name of the provider that produced the response.
    pub provider: String,
    /// Model id that produced the response.
    pub model: String,
    /// Wall-clock latency of the provider call in milliseconds.
    pub latency_ms: u64,
    /// Prompt tokens billed, when the provider reports them.
    pub input_tokens: Option<u64>,
    /// Completion tokens billed, when the provider reports them.
    pub output_tokens: Option<u64>,
}

impl LlmResponse {
    /// Total reported tokens, treating unreported counts as zero.
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.unwrap_or(0) + self.output_tokens.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors() {
        let message = ChatMessage::user("hello");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "hello");

        let message = ChatMessage::assistant("hi");
        assert_eq!(message.role, Role::Assistant);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("x")).unwrap();
        assert!(json.contains(r#""role":"user""#));
    }

    #[test]
    fn request_builder_chains() {
        let request = GenerateRequest::new("system", vec![ChatMessage::user("q")])
            .with_model("gpt-5.2")
            .with_reasoning(ReasoningConfig::Effort("high".to_owned()));
        assert_eq!(request.model.as_deref(), Some("gpt-5.2"));
        assert_eq!(
            request.reasoning,
            Some(ReasoningConfig::Effort("high".to_owned()))
        );
    }

    #[test]
    fn total_tokens_treats_missing_as_zero() {
        let response = LlmResponse {
            text: String::new(),
            provider: "mock".to_owned(),
            model: "m".to_owned(),
            latency_ms: 0,
            input_tokens: Some(10),
            output_tokens: None,
        };
        assert_eq!(response.total_tokens(), 10);
    }
}
