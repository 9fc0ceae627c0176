//! Bounded, overlapping chunking along structure-aware separators.
//!
//! Sizes are measured in characters, not bytes, so legacy-encoded sources
//! with multibyte text chunk the same as ASCII ones.

use crate::document::{Chunk, SourceDocument};

/// Separator tokens tried in priority order when picking a cut point.
const SEPARATORS: &[&str] = &["\n\nconst", "\nexport", "\nfunction", "\ninterface"];

/// Chunker configuration.
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Maximum chunk size in characters.
    pub max_size: usize,
    /// Characters shared between adjacent chunks of one document.
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_size: 2000,
            overlap: 200,
        }
    }
}

/// Last separator occurrence within the window, in priority order.
/// Occurrences at or before `min_cut` are rejected so every cut advances
/// past the previous chunk's overlap region.
fn best_separator_cut(window: &str, min_cut: usize) -> Option<usize> {
    for sep in SEPARATORS {
        if let Some(byte_pos) = window.rfind(sep) {
            let char_pos = window[..byte_pos].chars().count();
            if char_pos > min_cut {
                return Some(char_pos);
            }
        }
    }
    None
}

/// Split one document into overlapping chunks.
///
/// Documents no longer than `max_size` yield exactly one chunk equal to
/// the document. Otherwise each cut prefers a structural separator inside
/// the window and falls back to a hard cut at `max_size`; the next chunk
/// starts exactly `overlap` characters before the previous cut.
#[must_use]
pub fn split_document(doc: &SourceDocument, config: &ChunkerConfig) -> Vec<Chunk> {
    let content = &doc.content;
    let max_size = config.max_size.max(1);
    let overlap = config.overlap.min(max_size - 1);

    // Byte offset of every char boundary, so slicing stays UTF-8 safe.
    let mut boundaries: Vec<usize> = content.char_indices().map(|(i, _)| i).collect();
    boundaries.push(content.len());
    let total = boundaries.len() - 1;

    let make_chunk = |from: usize, to: usize| Chunk {
        content: content[boundaries[from]..boundaries[to]].to_string(),
        metadata: doc.metadata.clone(),
    };

    if total <= max_size {
        return vec![make_chunk(0, total)];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        if total - start <= max_size {
            chunks.push(make_chunk(start, total));
            break;
        }

        let window = &content[boundaries[start]..boundaries[start + max_size]];
        let cut = best_separator_cut(window, overlap).unwrap_or(max_size);
        let end = start + cut;

        chunks.push(make_chunk(start, end));
        start = end - overlap;
    }

    chunks
}
