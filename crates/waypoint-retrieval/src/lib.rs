//! Fixed-corpus retrieval for framework documents.
//!
//! ```text
//! source *.md ──► chunking::chunk_directory ──► Vec<Chunk>
//!                          │
//!                          ├─► index::build_index ──► vectors.bin + manifest.json
//!                          │        (offline, via embedding::EmbeddingProvider)
//!                          │
//! index artifacts ──► search::SearchEngine ──► SearchHit lists
//!    (or raw chunks, lexical-only)   │
//!                                    └─► tfidf::TfIdfIndex (fallback tier)
//! ```

/// Markdown chunking with heading hierarchy and size bounds.
pub mod chunking;
/// Embedding provider trait and the OpenAI client.
pub mod embedding;
/// Index building and persisted artifact handling.
pub mod index;
/// Three-tier search over the chunk corpus.
pub mod search;
/// TF-IDF lexical fallback index.
pub mod tfidf;

pub use chunking::{Chunk, ChunkKind, MAX_CHUNK_TOKENS, MIN_CHUNK_TOKENS, estimate_tokens};
pub use embedding::{EmbeddingProvider, OpenAiEmbeddingClient};
pub use index::{BuildSummary, IndexManifest, LoadedIndex, build_index, load_index, save_index};
pub use search::{SearchEngine, SearchHit};
pub use tfidf::TfIdfIndex;
