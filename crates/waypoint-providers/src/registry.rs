//! Provider registry with auto-detection.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;
use waypoint_core::{Error, ModelProvider, Result, Settings};

use crate::anthropic::AnthropicProvider;
use crate::google::GoogleProvider;
use crate::models::{ModelInfo, models_for_provider};
use crate::ollama::OllamaProvider;
use crate::openai::OpenAiProvider;

/// Registration status of one provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    /// Provider name.
    pub name: String,
    /// Default model id.
    pub model: String,
    /// Whether the provider is usable right now.
    pub available: bool,
}

/// Catalog entry exposed through the registry, with its model id.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    /// Provider name.
    pub provider: String,
    /// Display label.
    pub label: String,
    /// Short description.
    pub description: String,
    /// Reasoning parameter kind, serialized as a string tag.
    pub reasoning_param: Option<&'static str>,
    /// Accepted reasoning values.
    pub reasoning_options: Vec<&'static str>,
    /// Default reasoning value.
    pub reasoning_default: Option<&'static str>,
}

impl CatalogEntry {
    fn from_info(info: &ModelInfo) -> Self {
        Self {
            provider: info.provider.to_owned(),
            label: info.label.to_owned(),
            description: info.description.to_owned(),
            reasoning_param: info.reasoning_param.map(|param| match param {
                crate::models::ReasoningParam::Effort => "effort",
                crate::models::ReasoningParam::Thinking => "thinking",
                crate::models::ReasoningParam::ThinkingBudget => "thinking_budget",
                crate::models::ReasoningParam::ThinkingLevel => "thinking_level",
            }),
            reasoning_options: info.reasoning_options.to_vec(),
            reasoning_default: info.reasoning_default,
        }
    }
}

/// Registry of model providers; registration order drives auto-selection.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ModelProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider; a provider with the same name is replaced in
    /// place, keeping its position in the auto-selection order.
    pub fn register(&mut self, provider: Arc<dyn ModelProvider>) {
        if let Some(existing) = self
            .providers
            .iter_mut()
            .find(|registered| registered.name() == provider.name())
        {
            *existing = provider;
        } else {
            self.providers.push(provider);
        }
    }

    /// Creates the standard registry from settings: OpenAI, Anthropic,
    /// Google, then Ollama.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(OpenAiProvider::from_settings(settings)));
        registry.register(Arc::new(AnthropicProvider::from_settings(settings)));
        registry.register(Arc::new(GoogleProvider::from_settings(settings)));
        registry.register(Arc::new(OllamaProvider::from_settings(settings)));
        registry
    }

    /// Gets a provider by name, or auto-detects the first available one.
    ///
    /// # Errors
    /// `UnknownProvider` when the name is not registered;
    /// `ProviderUnavailable` when the named provider (or, for "auto", every
    /// provider) is not usable.
    pub async fn get(&self, name: &str) -> Result<Arc<dyn ModelProvider>> {
        if name == "auto" {
            for provider in &self.providers {
                if provider.is_available().await {
                    info!("Auto-selected provider '{}'", provider.name());
                    return Ok(Arc::clone(provider));
                }
            }
            return Err(Error::ProviderUnavailable(
                "No LLM providers available. Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or \
                 GOOGLE_API_KEY, or run Ollama locally."
                    .to_owned(),
            ));
        }

        let Some(provider) = self
            .providers
            .iter()
            .find(|provider| provider.name() == name)
        else {
            let registered: Vec<&str> = self
                .providers
                .iter()
                .map(|provider| provider.name())
                .collect();
            return Err(Error::UnknownProvider(format!(
                "{name}. Registered: {registered:?}"
            )));
        };

        if !provider.is_available().await {
            return Err(Error::ProviderUnavailable(format!(
                "Provider '{name}' is not available. Check your API key or service."
            )));
        }
        Ok(Arc::clone(provider))
    }

    /// Lists all registered providers with availability status.
    pub async fn available_providers(&self) -> Vec<ProviderStatus> {
        let mut statuses = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            statuses.push(ProviderStatus {
                name: provider.name().to_owned(),
                model: provider.default_model().to_owned(),
                available: provider.is_available().await,
            });
        }
        statuses
    }

    /// Full model catalog filtered to available providers.
    ///
    /// Ollama serves whatever is pulled locally, so it contributes a single
    /// dynamic entry for its configured model instead of catalog rows.
    pub async fn models_catalog(&self) -> BTreeMap<String, CatalogEntry> {
        let mut catalog = BTreeMap::new();
        for provider in &self.providers {
            if !provider.is_available().await {
                continue;
            }
            if provider.name() == "ollama" {
                catalog.insert(
                    provider.default_model().to_owned(),
                    CatalogEntry {
                        provider: "ollama".to_owned(),
                        label: provider.default_model().to_owned(),
                        description: "Local model via Ollama".to_owned(),
                        reasoning_param: None,
                        reasoning_options: Vec::new(),
                        reasoning_default: None,
                    },
                );
            } else {
                for (model_id, info) in models_for_provider(provider.name()) {
                    catalog.insert(model_id.to_owned(), CatalogEntry::from_info(info));
                }
            }
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;
    use async_trait::async_trait;
    use waypoint_core::{GenerateRequest, LlmResponse};

    /// Named mock with configurable availability, for ordering tests.
    struct NamedProvider {
        name: &'static str,
        available: bool,
    }

    #[async_trait]
    impl ModelProvider for NamedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn default_model(&self) -> &str {
            "test-model"
        }

        async fn is_available(&self) -> bool {
            self.available
        }

        async fn generate(&self, _request: &GenerateRequest) -> Result<LlmResponse> {
            Ok(LlmResponse {
                text: format!("from {}", self.name),
                provider: self.name.to_owned(),
                model: "test-model".to_owned(),
                latency_ms: 0,
                input_tokens: None,
                output_tokens: None,
            })
        }
    }

    #[tokio::test]
    async fn auto_selects_the_first_available_in_registration_order() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(NamedProvider {
            name: "first",
            available: false,
        }));
        registry.register(Arc::new(NamedProvider {
            name: "second",
            available: true,
        }));
        registry.register(Arc::new(NamedProvider {
            name: "third",
            available: true,
        }));

        let provider = registry.get("auto").await.expect("auto selection");
        assert_eq!(provider.name(), "second");
    }

    #[tokio::test]
    async fn auto_with_nothing_available_is_a_clear_error() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(NamedProvider {
            name: "only",
            available: false,
        }));

        let result = registry.get("auto").await;
        assert!(matches!(result, Err(Error::ProviderUnavailable(_))));
    }

    #[tokio::test]
    async fn unknown_and_unavailable_are_distinct_errors() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(NamedProvider {
            name: "offline",
            available: false,
        }));

        assert!(matches!(
            registry.get("nonexistent").await,
            Err(Error::UnknownProvider(_))
        ));
        assert!(matches!(
            registry.get("offline").await,
            Err(Error::ProviderUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn re_registration_replaces_in_place() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(MockProvider::unavailable()));
        registry.register(Arc::new(MockProvider::new()));

        let statuses = registry.available_providers().await;
        assert_eq!(statuses.len(), 1);
        assert!(statuses[0].available);
    }

    #[tokio::test]
    async fn status_list_reports_every_registration() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(NamedProvider {
            name: "up",
            available: true,
        }));
        registry.register(Arc::new(NamedProvider {
            name: "down",
            available: false,
        }));

        let statuses = registry.available_providers().await;
        assert_eq!(statuses.len(), 2);
        assert!(statuses[0].available);
        assert!(!statuses[1].available);
    }

    #[tokio::test]
    async fn catalog_only_lists_available_providers() {
        let settings = Settings::default();
        // Built from default settings with no keys configured in the
        // environment this test controls, the catalog may be empty or hold
        // real entries; either way it must not list providers that report
        // unavailable.
        let registry = ProviderRegistry::from_settings(&settings);
        let statuses = registry.available_providers().await;
        let catalog = registry.models_catalog().await;
        for entry in catalog.values() {
            assert!(
                statuses
                    .iter()
                    .any(|status| status.name == entry.provider && status.available)
            );
        }
    }
}
