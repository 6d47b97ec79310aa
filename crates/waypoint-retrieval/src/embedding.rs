//! Embedding generation for corpus chunks and queries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use waypoint_core::{Error, Result, Settings};

/// OpenAI embeddings endpoint URL.
const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
/// Env var key for the OpenAI API key.
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Maximum inputs per embedding request.
pub const EMBEDDING_BATCH_SIZE: usize = 100;
/// Inputs are truncated to this many characters before embedding; longer
/// inputs either fail or get silently truncated upstream.
pub const EMBEDDING_MAX_CHARS: usize = 8000;

/// Trait for generating fixed-length embeddings from text.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Whether credentials are present; unconfigured providers make the
    /// search engine skip the semantic tier without an error.
    fn is_configured(&self) -> bool;

    /// Embedding model id, recorded in the index manifest.
    fn model(&self) -> &str;

    /// Vector dimensionality this provider produces.
    fn dimensions(&self) -> usize;

    /// Generate an embedding for one text.
    ///
    /// # Errors
    /// Returns an error if embedding generation fails.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed multiple texts, batching requests internally.
    ///
    /// # Errors
    /// Returns an error if any batch fails; partial results are never
    /// returned.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Request payload for the OpenAI embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'req> {
    /// Embedding model id.
    model: &'req str,
    /// Batch of input texts.
    input: Vec<String>,
}

/// Response payload from the OpenAI embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    /// One entry per input, in input order.
    data: Vec<EmbeddingDatum>,
}

/// A single embedding result.
#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    /// The embedding vector.
    embedding: Vec<f32>,
}

/// OpenAI embedding client.
pub struct OpenAiEmbeddingClient {
    /// HTTP client for API requests.
    client: Client,
    /// API key; `None` leaves the client unconfigured.
    api_key: Option<String>,
    /// Embedding model id.
    model: String,
    /// Expected vector dimensionality.
    dimensions: usize,
}

impl OpenAiEmbeddingClient {
    /// Creates a client with an explicit key, model, and dimensionality.
    pub fn new(api_key: Option<String>, model: String, dimensions: usize) -> Self {
        Self {
            client: Client::default(),
            api_key,
            model,
            dimensions,
        }
    }

    /// Creates a client from settings, resolving the API key through config
    /// and environment.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.get_api_key("openai"),
            settings.embedding.model.clone(),
            settings.embedding.dimensions,
        )
    }

    /// Truncate an input to the embedding character cap at a char boundary.
    fn truncate(text: &str) -> String {
        if text.chars().count() > EMBEDDING_MAX_CHARS {
            text.chars().take(EMBEDDING_MAX_CHARS).collect()
        } else {
            text.to_owned()
        }
    }

    /// Send one batch of at most `EMBEDDING_BATCH_SIZE` inputs.
    async fn embed_one_batch(&self, api_key: &str, batch: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingsRequest {
            model: &self.model,
            input: batch.iter().map(|text| Self::truncate(text)).collect(),
        };

        let response = self
            .client
            .post(OPENAI_EMBEDDINGS_URL)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request)
            .send()
            .await
            .map_err(|error| Error::Embedding(format!("Embedding request failed: {error}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Embedding API error {status}: {error_text}"
            )));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|error| Error::Embedding(format!("Failed to parse embeddings: {error}")))?;

        if parsed.data.len() != batch.len() {
            return Err(Error::Embedding(format!(
                "Embedding count mismatch: sent {} inputs, got {} vectors",
                batch.len(),
                parsed.data.len()
            )));
        }

        let mut vectors = Vec::with_capacity(parsed.data.len());
        for datum in parsed.data {
            if datum.embedding.len() != self.dimensions {
                return Err(Error::Embedding(format!(
                    "Expected {}-dimensional vectors, got {}",
                    self.dimensions,
                    datum.embedding.len()
                )));
            }
            vectors.push(datum.embedding);
        }
        Ok(vectors)
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let input = [text.to_owned()];
        let vectors = self.embed_batch(&input).await?;
        vectors
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("No embedding returned".to_owned()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let Some(api_key) = self.api_key.clone() else {
            return Err(Error::MissingApiKey(ENV_OPENAI_API_KEY.to_owned()));
        };
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(EMBEDDING_BATCH_SIZE) {
            let batch_vectors = self.embed_one_batch(&api_key, batch).await?;
            vectors.extend(batch_vectors);
            debug!("Embedded {}/{} inputs", vectors.len(), texts.len());
        }
        Ok(vectors)
    }
}

/// Deterministic hash-based embedding provider for tests.
///
/// Produces stable small vectors without network access; also usable as a
/// forced-failure stand-in for exercising the lexical fallback tier.
#[cfg(test)]
pub(crate) struct FakeEmbeddingClient {
    /// Vector dimensionality to emit.
    pub dimensions: usize,
    /// When set, every call fails, simulating a request-time outage.
    pub fail: bool,
    /// When unset, the client reports itself unconfigured.
    pub configured: bool,
}

#[cfg(test)]
impl FakeEmbeddingClient {
    pub fn working(dimensions: usize) -> Self {
        Self {
            dimensions,
            fail: false,
            configured: true,
        }
    }

    pub fn failing(dimensions: usize) -> Self {
        Self {
            dimensions,
            fail: true,
            configured: true,
        }
    }

    pub fn unconfigured(dimensions: usize) -> Self {
        Self {
            dimensions,
            fail: false,
            configured: false,
        }
    }

    pub fn fake_embedding(&self, text: &str) -> Vec<f32> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash as _, Hasher as _};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let hash = hasher.finish();

        (0..self.dimensions)
            .map(|index| ((hash.wrapping_add(index as u64)) % 1000) as f32 / 1000.0)
            .collect()
    }
}

#[cfg(test)]
#[async_trait]
impl EmbeddingProvider for FakeEmbeddingClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    fn model(&self) -> &str {
        "fake-embedding"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.fail {
            return Err(Error::Embedding("forced failure".to_owned()));
        }
        Ok(self.fake_embedding(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.fail {
            return Err(Error::Embedding("forced failure".to_owned()));
        }
        Ok(texts.iter().map(|text| self.fake_embedding(text)).collect())
    }
}
