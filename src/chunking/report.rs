//! Document-level summary of a chunking run.

use crate::analysis::classifier::classify_document_type;
use crate::analysis::language::detect_language;
use crate::analysis::structure::analyze_structure;
use crate::core::{Chunk, DocumentStructure, DocumentType, Language};
use crate::io::unicode::char_len;
use serde::Serialize;

/// Aggregate view of a document and the chunks produced from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkingReport {
    /// Length of the document in characters.
    pub chars: usize,
    /// Dominant script of the whole document.
    pub language: Language,
    /// Document-wide structural flags.
    pub structure: DocumentStructure,
    /// Type attached to the chunks, or classified on the spot.
    pub document_type: DocumentType,
    /// Number of chunks.
    pub chunk_count: usize,
    /// Mean quality score; 0 without chunks.
    pub average_quality: f64,
    /// Lowest quality score; 0 without chunks.
    pub min_quality: u8,
    /// Chunks at or above the auto-approval threshold.
    pub auto_approvable: usize,
    /// Chunks whose content opens with an overlap prefix.
    pub overlapping: usize,
}

/// Summarizes `chunks` produced from `text`.
///
/// # Examples
///
/// ```
/// use smartchunk::chunking::{ChunkingOptions, smart_chunk, summarize};
///
/// let text = "The service starts today. Support is available by email.";
/// let chunks = smart_chunk(text, &ChunkingOptions::default());
/// let report = summarize(text, &chunks);
/// assert_eq!(report.chunk_count, 1);
/// assert_eq!(report.language.as_str(), "en");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(text: &str, chunks: &[Chunk]) -> ChunkingReport {
    let document_type = chunks
        .iter()
        .find_map(|c| c.metadata.document_type)
        .unwrap_or_else(|| classify_document_type(text));

    let total: u32 = chunks.iter().map(|c| u32::from(c.quality_score)).sum();
    let average_quality = if chunks.is_empty() {
        0.0
    } else {
        f64::from(total) / chunks.len() as f64
    };

    ChunkingReport {
        chars: char_len(text),
        language: detect_language(text),
        structure: analyze_structure(text),
        document_type,
        chunk_count: chunks.len(),
        average_quality,
        min_quality: chunks.iter().map(|c| c.quality_score).min().unwrap_or(0),
        auto_approvable: chunks.iter().filter(|c| c.is_auto_approvable()).count(),
        overlapping: chunks.iter().filter(|c| c.metadata.has_overlap).count(),
    }
}
