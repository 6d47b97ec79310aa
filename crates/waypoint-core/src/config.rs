//! Configuration for providers, retrieval paths, and budget enforcement.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Complete service configuration.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Provider selected when a request does not name one; `None` means
    /// auto-detection in registration order.
    pub default_provider: Option<String>,
    /// API keys for hosted model providers.
    pub api_keys: ApiKeys,
    /// Local Ollama runtime settings.
    pub ollama: OllamaSettings,
    /// Embedding model settings for the retrieval index.
    pub embedding: EmbeddingSettings,
    /// Token budget and rate limit settings.
    pub budget: BudgetSettings,
    /// Corpus and index locations.
    pub paths: PathSettings,
}

/// API keys for hosted model providers.
///
/// Keys left unset here fall back to the conventional environment variables.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    /// OpenAI API key (chat and embeddings).
    pub openai_api_key: Option<String>,
    /// Anthropic API key.
    pub anthropic_api_key: Option<String>,
    /// Google Generative AI API key.
    pub google_api_key: Option<String>,
}

/// Local Ollama runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaSettings {
    /// Base URL of the Ollama HTTP API.
    pub base_url: String,
    /// Default chat model name.
    pub model: String,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_owned(),
            model: "llama3.2".to_owned(),
        }
    }
}

/// Embedding model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model id.
    pub model: String,
    /// Vector dimensionality produced by the model.
    pub dimensions: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-large".to_owned(),
            dimensions: 3072,
        }
    }
}

/// Token budget and rate limit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetSettings {
    /// Daily token budget across all providers (input + output combined).
    pub daily_token_budget: u64,
    /// Maximum requests per client within one rate-limit window.
    pub rate_limit_requests: usize,
    /// Rate-limit window length in seconds.
    pub rate_limit_window_secs: u64,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            daily_token_budget: 500_000,
            rate_limit_requests: 20,
            rate_limit_window_secs: 60,
        }
    }
}

/// Corpus and index locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory containing the source markdown documents.
    pub source_dir: PathBuf,
    /// Directory holding the persisted vector index artifacts.
    pub index_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data/source"),
            index_dir: PathBuf::from("data/embeddings"),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|error| Error::Config(format!("Failed to read config: {error}")))?;
        let settings: Self = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Loads settings from the given file when present, falling back to
    /// defaults otherwise.
    ///
    /// # Errors
    /// Returns an error if a present file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load_from_file(path),
            Some(path) => Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            ))),
            None => Ok(Self::default()),
        }
    }

    /// Returns the API key for a provider, checking the config first and
    /// then the conventional environment variable.
    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        match provider {
            "openai" => self
                .api_keys
                .openai_api_key
                .clone()
                .or_else(|| env::var("OPENAI_API_KEY").ok()),
            "anthropic" => self
                .api_keys
                .anthropic_api_key
                .clone()
                .or_else(|| env::var("ANTHROPIC_API_KEY").ok()),
            "google" => self
                .api_keys
                .google_api_key
                .clone()
                .or_else(|| env::var("GOOGLE_API_KEY").ok()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.embedding.model, "text-embedding-3-large");
        assert_eq!(settings.embedding.dimensions, 3072);
        assert_eq!(settings.budget.daily_token_budget, 500_000);
        assert_eq!(settings.ollama.base_url, "http://localhost:11434");
    }

    #[test]
    fn load_from_toml_file() {
        let toml_content = r#"
default_provider = "anthropic"

[api_keys]
openai_api_key = "sk-test-123"

[embedding]
model = "text-embedding-3-small"
dimensions = 1536

[budget]
daily_token_budget = 100000
"#;
        let mut temp_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(toml_content.as_bytes())
            .expect("Failed to write to temp file");

        let settings =
            Settings::load_from_file(temp_file.path()).expect("Failed to load settings");
        assert_eq!(settings.default_provider.as_deref(), Some("anthropic"));
        assert_eq!(
            settings.get_api_key("openai"),
            Some("sk-test-123".to_owned())
        );
        assert_eq!(settings.embedding.dimensions, 1536);
        assert_eq!(settings.budget.daily_token_budget, 100_000);
        // Unspecified sections keep their defaults.
        assert_eq!(settings.budget.rate_limit_requests, 20);
    }

    #[test]
    fn unknown_provider_has_no_key() {
        let settings = Settings::default();
        assert_eq!(settings.get_api_key("mistral"), None);
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let result = Settings::load_or_default(Some(Path::new("/nonexistent/waypoint.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
