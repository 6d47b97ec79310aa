//! Provider adapters for external LLM services, plus the registry that
//! selects among them.

/// Anthropic Messages API provider implementation.
pub mod anthropic;
/// Google Generative AI provider implementation.
pub mod google;
/// Mock provider for testing.
pub mod mock;
/// Model catalog with reasoning parameter metadata.
pub mod models;
/// Ollama local runtime provider implementation.
pub mod ollama;
/// OpenAI Responses API provider implementation.
pub mod openai;
/// Provider registry with auto-detection.
pub mod registry;

pub use anthropic::AnthropicProvider;
pub use google::GoogleProvider;
pub use mock::MockProvider;
pub use models::{ModelInfo, ReasoningParam, get_model_info, models_for_provider, reasoning_config_for};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use registry::{CatalogEntry, ProviderRegistry, ProviderStatus};
