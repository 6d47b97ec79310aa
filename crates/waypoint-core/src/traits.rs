use async_trait::async_trait;

use crate::{GenerateRequest, LlmResponse, Result};

/// Trait for LLM providers that can generate grounded chat responses.
///
/// A registry holds one implementation per vendor and selects among them by
/// name, or scans registration order for the first available one.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Returns the unique identifier for this provider (e.g. "openai").
    fn name(&self) -> &'static str;

    /// Returns the model id used when a request carries no override.
    fn default_model(&self) -> &str;

    /// Checks whether this provider is configured and ready to process
    /// requests, without invoking it.
    async fn is_available(&self) -> bool;

    /// Generates a response for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unavailable, the request fails,
    /// or the response cannot be parsed.
    async fn generate(&self, request: &GenerateRequest) -> Result<LlmResponse>;
}
