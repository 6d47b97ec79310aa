//! Heading-aware markdown chunking.

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;
use waypoint_core::{Error, Result};

use super::tags::{extract_level, extract_stage};
use super::{Chunk, ChunkKind, MAX_CHUNK_TOKENS, MIN_CHUNK_TOKENS, estimate_tokens};

/// A heading-delimited region of a document.
struct Section {
    /// Ancestor headings, root to leaf.
    hierarchy: Vec<String>,
    /// Raw text between this heading and the next.
    content: String,
}

/// Parse a heading marker line (levels 1-3), returning (depth, title).
fn parse_heading(line: &str) -> Option<(usize, String)> {
    let trimmed = line.trim_start();
    let depth = trimmed.chars().take_while(|character| *character == '#').count();
    if !(1..=3).contains(&depth) {
        return None;
    }
    let rest = &trimmed[depth..];
    rest.strip_prefix(|character: char| character.is_whitespace())
        .map(|title| (depth, title.trim().to_owned()))
}

/// Split a document into heading-delimited sections.
///
/// The heading stack pops entries at depth `>= d` before pushing a heading
/// at depth `d`, so a sibling heading drops the deeper ancestors of the
/// section before it.
fn split_by_headings(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut hierarchy: Vec<String> = Vec::new();
    let mut content_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some((depth, title)) = parse_heading(line) {
            if !content_lines.is_empty() {
                sections.push(Section {
                    hierarchy: hierarchy.clone(),
                    content: content_lines.join("\n"),
                });
                content_lines.clear();
            }
            while hierarchy.len() >= depth {
                hierarchy.pop();
            }
            hierarchy.push(title);
        } else {
            content_lines.push(line);
        }
    }

    if !content_lines.is_empty() {
        sections.push(Section {
            hierarchy,
            content: content_lines.join("\n"),
        });
    }

    sections
}

/// Split text into paragraphs at blank-line boundaries.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

/// Split an oversized section into sub-chunks at paragraph boundaries.
///
/// Consecutive paragraphs are packed greedily until the next one would push
/// the sub-chunk over `MAX_CHUNK_TOKENS`. A single paragraph that is itself
/// oversized is kept whole.
fn split_to_size(text: &str) -> Vec<String> {
    if estimate_tokens(text) <= MAX_CHUNK_TOKENS {
        return vec![text.to_owned()];
    }

    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_tokens = 0;

    for paragraph in split_paragraphs(text) {
        let paragraph_tokens = estimate_tokens(&paragraph);
        if current_tokens + paragraph_tokens > MAX_CHUNK_TOKENS && !current.is_empty() {
            chunks.push(current.join("\n\n"));
            current_tokens = paragraph_tokens;
            current = vec![paragraph];
        } else {
            current_tokens += paragraph_tokens;
            current.push(paragraph);
        }
    }
    if !current.is_empty() {
        chunks.push(current.join("\n\n"));
    }

    if chunks.is_empty() {
        vec![text.to_owned()]
    } else {
        chunks
    }
}

/// Chunk a single markdown file, assigning ids from `start_id`.
///
/// # Errors
/// Returns an error if the file cannot be read; corpus builds fail fast
/// rather than skipping documents.
pub fn chunk_file(path: &Path, start_id: usize) -> Result<Vec<Chunk>> {
    let text = fs::read_to_string(path).map_err(Error::Io)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut chunks = Vec::new();
    for section in split_by_headings(&text) {
        if section.content.trim().is_empty() {
            continue;
        }

        let section_title = section
            .hierarchy
            .last()
            .cloned()
            .unwrap_or_else(|| stem.clone());
        let heading_path = section.hierarchy.join(" ");
        let level = extract_level(&heading_path);
        let stage = extract_stage(&heading_path);
        let kind = if section.content.matches('|').count() > 4 {
            ChunkKind::Table
        } else {
            ChunkKind::Prose
        };

        for sub_text in split_to_size(&section.content) {
            let token_count = estimate_tokens(&sub_text);
            if token_count < MIN_CHUNK_TOKENS {
                continue;
            }
            chunks.push(Chunk {
                id: start_id + chunks.len(),
                source_file: file_name.clone(),
                section_title: section_title.clone(),
                heading_hierarchy: section.hierarchy.clone(),
                text: sub_text.trim().to_owned(),
                token_count,
                level,
                stage,
                kind,
            });
        }
    }

    debug!("Chunked {} into {} chunks", path.display(), chunks.len());
    Ok(chunks)
}

/// Chunk every markdown document under `dir`.
///
/// Files are visited in lexicographic name order and chunk ids increment
/// across the whole run without resetting between documents.
///
/// # Errors
/// Returns an error if any document cannot be read (fail-fast; corpus
/// integrity requires every configured document to be present).
pub fn chunk_directory(dir: &Path) -> Result<Vec<Chunk>> {
    let mut chunks: Vec<Chunk> = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|error| {
            Error::Index(format!("Failed to walk {}: {error}", dir.display()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_markdown = entry
            .path()
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| matches!(extension, "md" | "markdown"));
        if !is_markdown {
            continue;
        }
        let file_chunks = chunk_file(entry.path(), chunks.len())?;
        chunks.extend(file_chunks);
    }
    Ok(chunks)
}
