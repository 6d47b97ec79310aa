//! Three-tier search over the chunk corpus.
//!
//! Tier 1: cosine similarity over persisted vectors, when an index exists
//! and a query embedding can be produced. Tier 2: any request-time
//! embedding failure falls back to the lexical index. Tier 3: with no
//! corpus at all, every search returns an empty list.

use std::cmp::Ordering;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};
use waypoint_core::Result;

use crate::chunking::{Chunk, chunk_directory};
use crate::embedding::EmbeddingProvider;
use crate::index::load_index;
use crate::tfidf::TfIdfIndex;

/// A ranked search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// The matched chunk, flattened into the result record.
    #[serde(flatten)]
    pub chunk: Chunk,
    /// Relevance score; cosine similarity in either tier.
    pub score: f32,
}

/// Search engine over the fixed corpus.
///
/// The engine is loaded once and read-only afterwards; `search` takes
/// `&self`, so concurrent in-flight requests share it without locking.
pub struct SearchEngine<E> {
    chunks: Vec<Chunk>,
    vectors: Option<Vec<Vec<f32>>>,
    tfidf: Option<TfIdfIndex>,
    embedder: E,
}

impl<E: EmbeddingProvider> SearchEngine<E> {
    /// Open the engine, establishing one of the three corpus states.
    ///
    /// A persisted index is preferred; without one, raw source documents are
    /// chunked in memory for lexical-only operation; with neither, the
    /// engine serves empty results.
    ///
    /// # Errors
    /// Returns an error if a present index pair fails validation or a
    /// source document cannot be read.
    pub fn open(index_dir: &Path, source_dir: &Path, embedder: E) -> Result<Self> {
        if let Some(loaded) = load_index(index_dir)? {
            let texts: Vec<String> = loaded
                .manifest
                .chunks
                .iter()
                .map(|chunk| chunk.text.clone())
                .collect();
            let tfidf = TfIdfIndex::build(&texts);
            info!(
                "Search engine loaded {} chunks ({}d) with lexical fallback",
                loaded.manifest.chunks.len(),
                loaded.manifest.dimensions
            );
            return Ok(Self {
                chunks: loaded.manifest.chunks,
                vectors: Some(loaded.vectors),
                tfidf: Some(tfidf),
                embedder,
            });
        }

        if source_dir.exists() {
            let chunks = chunk_directory(source_dir)?;
            if !chunks.is_empty() {
                let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
                let tfidf = TfIdfIndex::build(&texts);
                info!(
                    "No index found; loaded {} chunks from source (lexical only)",
                    chunks.len()
                );
                return Ok(Self {
                    chunks,
                    vectors: None,
                    tfidf: Some(tfidf),
                    embedder,
                });
            }
        }

        info!("No corpus found; search will return empty results");
        Ok(Self {
            chunks: Vec::new(),
            vectors: None,
            tfidf: None,
            embedder,
        })
    }

    /// Find the `top_k` chunks most relevant to the query.
    ///
    /// Never errors: embedding failures degrade to the lexical tier and an
    /// empty corpus yields an empty list.
    pub async fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        if self.chunks.is_empty() {
            return Vec::new();
        }

        if self.vectors.is_some() && self.embedder.is_configured() {
            match self.embedder.embed(query).await {
                Ok(query_embedding) => return self.semantic_search(&query_embedding, top_k),
                Err(error) => {
                    warn!("Query embedding failed, falling back to lexical search: {error}");
                }
            }
        }

        self.lexical_search(query, top_k)
    }

    /// Cosine similarity over every stored vector, top-k descending.
    ///
    /// No positive-score filter applies here: low and negative similarities
    /// still fill `top_k`. Only the lexical tier filters.
    fn semantic_search(&self, query_embedding: &[f32], top_k: usize) -> Vec<SearchHit> {
        let Some(vectors) = &self.vectors else {
            return Vec::new();
        };

        let mut scored: Vec<(usize, f32)> = vectors
            .iter()
            .enumerate()
            .map(|(row, vector)| (row, cosine_similarity(query_embedding, vector)))
            .collect();
        scored.sort_by(|left, right| right.1.partial_cmp(&left.1).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .take(top_k)
            .map(|(row, score)| SearchHit {
                chunk: self.chunks[row].clone(),
                score,
            })
            .collect()
    }

    /// TF-IDF cosine scoring; strictly positive similarities only.
    fn lexical_search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let Some(tfidf) = &self.tfidf else {
            return Vec::new();
        };

        tfidf
            .search(query, top_k)
            .into_iter()
            .map(|(row, score)| SearchHit {
                chunk: self.chunks[row].clone(),
                score,
            })
            .collect()
    }

    /// Number of chunks in the corpus.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the engine is in the empty-corpus terminal state.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Whether the semantic tier is loadable (a vector index is present).
    pub fn has_vectors(&self) -> bool {
        self.vectors.is_some()
    }

    #[cfg(test)]
    fn from_parts(
        chunks: Vec<Chunk>,
        vectors: Option<Vec<Vec<f32>>>,
        tfidf: Option<TfIdfIndex>,
        embedder: E,
    ) -> Self {
        Self {
            chunks,
            vectors,
            tfidf,
            embedder,
        }
    }
}

/// Calculate cosine similarity between two vectors.
fn cosine_similarity(vector_a: &[f32], vector_b: &[f32]) -> f32 {
    if vector_a.len() != vector_b.len() {
        return 0.0;
    }

    let dot_product: f32 = vector_a
        .iter()
        .zip(vector_b.iter())
        .map(|(left, right)| left * right)
        .sum();
    let magnitude_a = vector_a.iter().map(|value| value * value).sum::<f32>().sqrt();
    let magnitude_b = vector_b.iter().map(|value| value * value).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::ChunkKind;
    use crate::embedding::FakeEmbeddingClient;
    use crate::index::{IndexManifest, save_index};
    use async_trait::async_trait;
    use std::fs;
    use waypoint_core::Error;

    fn chunk(id: usize, text: &str) -> Chunk {
        Chunk {
            id,
            source_file: "doc.md".to_owned(),
            section_title: format!("Section {id}"),
            heading_hierarchy: vec![format!("Section {id}")],
            text: text.to_owned(),
            token_count: 40,
            level: None,
            stage: None,
            kind: ChunkKind::Prose,
        }
    }

    /// Embedder returning a constant query vector, for controlled scoring.
    struct FixedEmbeddingClient {
        vector: Vec<f32>,
    }

    #[async_trait]
    impl EmbeddingProvider for FixedEmbeddingClient {
        fn is_configured(&self) -> bool {
            true
        }

        fn model(&self) -> &str {
            "fixed"
        }

        fn dimensions(&self) -> usize {
            self.vector.len()
        }

        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.vector.clone())
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| self.vector.clone()).collect())
        }
    }

    fn corpus_texts() -> [&'static str; 3] {
        [
            "Harness pipelines run evaluations autonomously overnight without supervision",
            "Designers explore prompt libraries and share structured context blocks",
            "Evaluation gates decide pass retry escalate outcomes for agent pipelines",
        ]
    }

    #[tokio::test]
    async fn empty_corpus_returns_empty_results() {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine = SearchEngine::open(
            &dir.path().join("index"),
            &dir.path().join("source"),
            FakeEmbeddingClient::working(8),
        )
        .expect("open");
        assert!(engine.is_empty());
        assert!(engine.search("anything", 3).await.is_empty());
    }

    #[tokio::test]
    async fn source_documents_enable_lexical_only_mode() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("source");
        fs::create_dir_all(&source).expect("mkdir");
        let body: String = (0..50)
            .map(|index| format!("pipeline{index} evaluation gates "))
            .collect();
        fs::write(source.join("doc.md"), format!("# Gates\n\n{body}\n")).expect("write");

        let engine = SearchEngine::open(
            &dir.path().join("index"),
            &source,
            FakeEmbeddingClient::unconfigured(8),
        )
        .expect("open");
        assert!(!engine.is_empty());
        assert!(!engine.has_vectors());

        let hits = engine.search("evaluation gates", 3).await;
        assert!(!hits.is_empty());
    }

    #[tokio::test]
    async fn embedding_failure_matches_the_lexical_path() {
        let texts = corpus_texts();
        let chunks: Vec<Chunk> = texts
            .iter()
            .enumerate()
            .map(|(id, text)| chunk(id, text))
            .collect();
        let owned: Vec<String> = texts.iter().map(|text| (*text).to_owned()).collect();

        let vectors = {
            let fake = FakeEmbeddingClient::working(8);
            texts.iter().map(|text| fake.fake_embedding(text)).collect()
        };

        let failing = SearchEngine::from_parts(
            chunks.clone(),
            Some(vectors),
            Some(TfIdfIndex::build(&owned)),
            FakeEmbeddingClient::failing(8),
        );
        let lexical_only = SearchEngine::from_parts(
            chunks,
            None,
            Some(TfIdfIndex::build(&owned)),
            FakeEmbeddingClient::failing(8),
        );

        let degraded = failing.search("evaluation pipelines", 3).await;
        let direct = lexical_only.search("evaluation pipelines", 3).await;

        assert!(!degraded.is_empty(), "fallback must not yield empty results");
        assert_eq!(degraded.len(), direct.len());
        for (left, right) in degraded.iter().zip(&direct) {
            assert_eq!(left.chunk.id, right.chunk.id);
            assert!((left.score - right.score).abs() < f32::EPSILON);
        }
    }

    #[tokio::test]
    async fn semantic_tier_keeps_zero_and_negative_scores() {
        let chunks = vec![chunk(0, "aligned"), chunk(1, "orthogonal"), chunk(2, "opposed")];
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]];
        let engine = SearchEngine::from_parts(
            chunks,
            Some(vectors),
            None,
            FixedEmbeddingClient {
                vector: vec![1.0, 0.0],
            },
        );

        let hits = engine.search("query", 3).await;
        assert_eq!(hits.len(), 3, "low scores still fill top_k");
        assert_eq!(hits[0].chunk.id, 0);
        assert!((hits[1].score).abs() < f32::EPSILON);
        assert!(hits[2].score < 0.0);
    }

    #[tokio::test]
    async fn persisted_index_enables_both_tiers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let index_dir = dir.path().join("index");
        let texts = corpus_texts();
        let chunks: Vec<Chunk> = texts
            .iter()
            .enumerate()
            .map(|(id, text)| chunk(id, text))
            .collect();
        let fake = FakeEmbeddingClient::working(8);
        let vectors: Vec<Vec<f32>> =
            texts.iter().map(|text| fake.fake_embedding(text)).collect();
        let manifest = IndexManifest {
            model: "fake-embedding".to_owned(),
            dimensions: 8,
            shape: [chunks.len(), 8],
            chunks,
        };
        save_index(&index_dir, &manifest, &vectors).expect("save");

        let engine = SearchEngine::open(
            &index_dir,
            &dir.path().join("source"),
            FakeEmbeddingClient::working(8),
        )
        .expect("open");
        assert!(engine.has_vectors());
        assert_eq!(engine.len(), 3);

        // Semantic tier serves results.
        let hits = engine.search("evaluation pipelines", 2).await;
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn corrupt_index_is_a_hard_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let index_dir = dir.path().join("index");
        fs::create_dir_all(&index_dir).expect("mkdir");
        fs::write(index_dir.join("vectors.bin"), [0_u8; 8]).expect("write");
        fs::write(index_dir.join("manifest.json"), b"{not json").expect("write");

        let result = SearchEngine::open(
            &index_dir,
            &dir.path().join("source"),
            FakeEmbeddingClient::working(8),
        );
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
