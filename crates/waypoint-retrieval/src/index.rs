//! Persisted index artifacts: a raw `[N, D]` f32 vector file plus a JSON
//! manifest whose record order matches the vector row order.
//!
//! The positional join between the two artifacts is the load-bearing
//! invariant here: both files are validated against each other on load and
//! written all-or-nothing (temp file + rename) so a partially built or
//! mismatched pair is never observable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use tracing::info;
use waypoint_core::{Error, Result};

use crate::chunking::{Chunk, chunk_directory};
use crate::embedding::EmbeddingProvider;

/// File name of the raw vector array.
pub const VECTORS_FILE: &str = "vectors.bin";
/// File name of the metadata manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Metadata manifest persisted alongside the vector array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexManifest {
    /// Embedding model that produced the vectors.
    pub model: String,
    /// Vector dimensionality.
    pub dimensions: usize,
    /// `[N, D]` shape of the vector array, for cross-checking.
    pub shape: [usize; 2],
    /// Chunk records, one per vector row, in row order.
    pub chunks: Vec<Chunk>,
}

/// A loaded, validated index pair.
#[derive(Debug, Clone)]
pub struct LoadedIndex {
    /// The manifest, including all chunk metadata.
    pub manifest: IndexManifest,
    /// One vector per chunk, row order matching manifest order.
    pub vectors: Vec<Vec<f32>>,
}

/// Summary of an offline index build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    /// Number of chunks embedded and persisted.
    pub chunks: usize,
    /// Vector dimensionality.
    pub dimensions: usize,
    /// Embedding model id.
    pub model: String,
}

/// Serialize vectors as a row-major little-endian f32 array.
fn encode_vectors(vectors: &[Vec<f32>], dimensions: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(vectors.len() * dimensions * 4);
    for (row, vector) in vectors.iter().enumerate() {
        if vector.len() != dimensions {
            return Err(Error::Index(format!(
                "Vector row {row} has {} dimensions, expected {dimensions}",
                vector.len()
            )));
        }
        for value in vector {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }
    Ok(bytes)
}

/// Decode a row-major little-endian f32 array of known shape.
fn decode_vectors(bytes: &[u8], rows: usize, dimensions: usize) -> Result<Vec<Vec<f32>>> {
    let expected = rows * dimensions * 4;
    if bytes.len() != expected {
        return Err(Error::Index(format!(
            "Vector file is {} bytes, expected {expected} for shape [{rows}, {dimensions}]",
            bytes.len()
        )));
    }

    let mut vectors = Vec::with_capacity(rows);
    let mut values = bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    for _ in 0..rows {
        vectors.push(values.by_ref().take(dimensions).collect());
    }
    Ok(vectors)
}

/// Persist a manifest and its vectors atomically.
///
/// Both artifacts are written to temporary paths first and renamed into
/// place only after both serialize successfully, so readers never observe a
/// half-written or mismatched pair.
///
/// # Errors
/// Returns an error if the shapes disagree or any write fails; on failure
/// nothing is persisted.
pub fn save_index(dir: &Path, manifest: &IndexManifest, vectors: &[Vec<f32>]) -> Result<()> {
    if manifest.chunks.len() != vectors.len() {
        return Err(Error::Index(format!(
            "Manifest has {} chunks but {} vectors were provided",
            manifest.chunks.len(),
            vectors.len()
        )));
    }
    if manifest.shape != [vectors.len(), manifest.dimensions] {
        return Err(Error::Index(format!(
            "Manifest shape {:?} disagrees with [{}, {}]",
            manifest.shape,
            vectors.len(),
            manifest.dimensions
        )));
    }

    fs::create_dir_all(dir)?;

    let vector_bytes = encode_vectors(vectors, manifest.dimensions)?;
    let manifest_bytes = serde_json::to_vec_pretty(manifest)?;

    let vectors_tmp = dir.join(format!("{VECTORS_FILE}.tmp"));
    let manifest_tmp = dir.join(format!("{MANIFEST_FILE}.tmp"));
    fs::write(&vectors_tmp, vector_bytes)?;
    fs::write(&manifest_tmp, manifest_bytes)?;
    fs::rename(&vectors_tmp, dir.join(VECTORS_FILE))?;
    fs::rename(&manifest_tmp, dir.join(MANIFEST_FILE))?;

    info!(
        "Saved {} vectors ({}d) to {}",
        vectors.len(),
        manifest.dimensions,
        dir.display()
    );
    Ok(())
}

/// Load a persisted index pair, if present.
///
/// Returns `Ok(None)` when either artifact is absent (no index has been
/// built). A present-but-inconsistent pair is a hard error, never a silent
/// truncation.
///
/// # Errors
/// Returns an error if either file cannot be parsed or the positional join
/// fails validation.
pub fn load_index(dir: &Path) -> Result<Option<LoadedIndex>> {
    let vectors_path = dir.join(VECTORS_FILE);
    let manifest_path = dir.join(MANIFEST_FILE);
    if !vectors_path.exists() || !manifest_path.exists() {
        return Ok(None);
    }

    let manifest_bytes = fs::read(&manifest_path)?;
    let manifest: IndexManifest = serde_json::from_slice(&manifest_bytes)?;

    let [rows, dimensions] = manifest.shape;
    if dimensions != manifest.dimensions {
        return Err(Error::Index(format!(
            "Manifest dimensions {} disagree with shape {:?}",
            manifest.dimensions, manifest.shape
        )));
    }
    if rows != manifest.chunks.len() {
        return Err(Error::Index(format!(
            "Manifest lists {} chunks but shape says {rows} rows",
            manifest.chunks.len()
        )));
    }

    let vector_bytes = fs::read(&vectors_path)?;
    let vectors = decode_vectors(&vector_bytes, rows, dimensions)?;

    info!(
        "Loaded {} vectors ({}d) from {}",
        rows,
        dimensions,
        dir.display()
    );
    Ok(Some(LoadedIndex { manifest, vectors }))
}

/// Build the full index offline: chunk the corpus, embed every chunk, and
/// persist the artifact pair.
///
/// # Errors
/// Returns an error if any document is unreadable, any embedding batch
/// fails, or persistence fails. Nothing is persisted on failure — all
/// chunks are embedded, or none are saved.
pub async fn build_index<E: EmbeddingProvider>(
    source_dir: &Path,
    index_dir: &Path,
    embedder: &E,
) -> Result<BuildSummary> {
    let chunks = chunk_directory(source_dir)?;
    if chunks.is_empty() {
        return Err(Error::Index(format!(
            "No markdown documents found under {}",
            source_dir.display()
        )));
    }
    info!("Embedding {} chunks...", chunks.len());

    let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
    let vectors = embedder.embed_batch(&texts).await?;
    if vectors.len() != chunks.len() {
        return Err(Error::Index(format!(
            "Embedded {} of {} chunks",
            vectors.len(),
            chunks.len()
        )));
    }

    let manifest = IndexManifest {
        model: embedder.model().to_owned(),
        dimensions: embedder.dimensions(),
        shape: [chunks.len(), embedder.dimensions()],
        chunks,
    };
    save_index(index_dir, &manifest, &vectors)?;

    Ok(BuildSummary {
        chunks: manifest.chunks.len(),
        dimensions: manifest.dimensions,
        model: manifest.model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::ChunkKind;
    use crate::embedding::FakeEmbeddingClient;

    fn sample_chunk(id: usize, text: &str) -> Chunk {
        Chunk {
            id,
            source_file: "doc.md".to_owned(),
            section_title: "Section".to_owned(),
            heading_hierarchy: vec!["Section".to_owned()],
            text: text.to_owned(),
            token_count: 42,
            level: Some(2),
            stage: Some('P'),
            kind: ChunkKind::Prose,
        }
    }

    fn sample_manifest(vectors: &[Vec<f32>]) -> IndexManifest {
        IndexManifest {
            model: "fake-embedding".to_owned(),
            dimensions: vectors[0].len(),
            shape: [vectors.len(), vectors[0].len()],
            chunks: (0..vectors.len())
                .map(|id| sample_chunk(id, &format!("chunk {id}")))
                .collect(),
        }
    }

    #[test]
    fn round_trip_preserves_vectors_and_metadata() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vectors = vec![vec![0.1_f32, 0.2, 0.3], vec![0.4, 0.5, 0.6]];
        let manifest = sample_manifest(&vectors);

        save_index(dir.path(), &manifest, &vectors).expect("save");
        let loaded = load_index(dir.path())
            .expect("load")
            .expect("index present");

        assert_eq!(loaded.vectors, vectors);
        assert_eq!(loaded.manifest.chunks.len(), 2);
        assert_eq!(loaded.manifest.chunks[1].text, "chunk 1");
        assert_eq!(loaded.manifest.chunks[1].level, Some(2));
    }

    #[test]
    fn absent_artifacts_load_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_index(dir.path()).expect("load").is_none());
    }

    #[test]
    fn mismatched_chunk_count_fails_to_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vectors = vec![vec![0.1_f32, 0.2]];
        let mut manifest = sample_manifest(&vectors);
        manifest.chunks.push(sample_chunk(1, "extra"));
        manifest.shape = [2, 2];

        assert!(save_index(dir.path(), &manifest, &vectors).is_err());
        // Nothing persisted on failure.
        assert!(load_index(dir.path()).expect("load").is_none());
    }

    #[test]
    fn truncated_vector_file_fails_validation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vectors = vec![vec![0.1_f32, 0.2], vec![0.3, 0.4]];
        let manifest = sample_manifest(&vectors);
        save_index(dir.path(), &manifest, &vectors).expect("save");

        // Corrupt the vector file so the byte length no longer matches.
        let vectors_path = dir.path().join(VECTORS_FILE);
        let bytes = fs::read(&vectors_path).expect("read");
        fs::write(&vectors_path, &bytes[..bytes.len() - 4]).expect("write");

        assert!(matches!(load_index(dir.path()), Err(Error::Index(_))));
    }

    #[test]
    fn manifest_row_count_mismatch_fails_validation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vectors = vec![vec![0.1_f32, 0.2], vec![0.3, 0.4]];
        let manifest = sample_manifest(&vectors);
        save_index(dir.path(), &manifest, &vectors).expect("save");

        // Hand-edit the manifest to drop a chunk without touching vectors.
        let manifest_path = dir.path().join(MANIFEST_FILE);
        let mut edited: IndexManifest =
            serde_json::from_slice(&fs::read(&manifest_path).expect("read")).expect("parse");
        edited.chunks.pop();
        fs::write(&manifest_path, serde_json::to_vec(&edited).expect("json")).expect("write");

        assert!(matches!(load_index(dir.path()), Err(Error::Index(_))));
    }

    #[tokio::test]
    async fn build_index_over_a_corpus() {
        let source = tempfile::tempdir().expect("tempdir");
        let index = tempfile::tempdir().expect("tempdir");
        let body: String = (0..80).map(|index| format!("word{index} ")).collect();
        fs::write(
            source.path().join("doc.md"),
            format!("# SAE L1: AI-Assisted\n\n{body}\n"),
        )
        .expect("write doc");

        let embedder = FakeEmbeddingClient::working(16);
        let summary = build_index(source.path(), index.path(), &embedder)
            .await
            .expect("build");
        assert!(summary.chunks > 0);
        assert_eq!(summary.dimensions, 16);

        let loaded = load_index(index.path())
            .expect("load")
            .expect("index present");
        assert_eq!(loaded.vectors.len(), loaded.manifest.chunks.len());
    }

    #[tokio::test]
    async fn failed_embedding_persists_nothing() {
        let source = tempfile::tempdir().expect("tempdir");
        let index = tempfile::tempdir().expect("tempdir");
        let body: String = (0..80).map(|index| format!("word{index} ")).collect();
        fs::write(source.path().join("doc.md"), format!("# Doc\n\n{body}\n")).expect("write doc");

        let embedder = FakeEmbeddingClient::failing(16);
        assert!(
            build_index(source.path(), index.path(), &embedder)
                .await
                .is_err()
        );
        assert!(load_index(index.path()).expect("load").is_none());
    }
}
