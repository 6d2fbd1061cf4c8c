//! Chunk representation.
//!
//! A chunk is the atomic retrieval unit handed to downstream embedding,
//! indexing and review stages. It carries its verbatim content (overlap
//! prefix included), a quality score, and metadata describing where the
//! primary content came from and what it looks like.

use super::document::{DocumentType, Language};
use crate::io::unicode::{byte_offset_of_char, char_len};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Quality score at or above which a chunk may skip human review.
pub const AUTO_APPROVE_THRESHOLD: u8 = 85;

/// A finished chunk of a document.
///
/// # Examples
///
/// ```
/// use smartchunk::core::{Chunk, ChunkMetadata};
///
/// let chunk = Chunk::new(0, "Hello, world!".to_string(), 72, ChunkMetadata::default());
/// assert_eq!(chunk.size(), 13);
/// assert!(!chunk.is_auto_approvable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Position in the final output, dense from 0.
    pub index: usize,

    /// Chunk content, including any overlap prefix.
    pub content: String,

    /// Fitness for retrieval, 0-100.
    pub quality_score: u8,

    /// Chunk metadata.
    pub metadata: ChunkMetadata,
}

/// Metadata attached to every surviving chunk.
///
/// Offsets are character (Unicode scalar) offsets into the original input
/// and cover the primary content only, not the overlap prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    /// Start of the primary content in the original text.
    pub start_offset: usize,

    /// End (exclusive) of the primary content in the original text.
    pub end_offset: usize,

    /// Whether the chunk holds both a question and an answer marker.
    #[serde(rename = "isQAPair")]
    pub is_qa_pair: bool,

    /// Whether the chunk contains a header line.
    pub has_header: bool,

    /// Whether the chunk contains a table row.
    pub is_table: bool,

    /// Whether the chunk contains a list item.
    pub is_list: bool,

    /// Dominant script of the chunk.
    pub language: Language,

    /// Readability score of the chunk content, 0-100.
    pub readability_score: u8,

    /// Number of non-blank sentences.
    pub sentence_count: usize,

    /// Mean sentence length in characters.
    pub avg_sentence_length: f64,

    /// Classified document type, present only when auto-detection ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,

    /// Whether the content opens with text duplicated from the previous chunk.
    pub has_overlap: bool,

    /// Whether the quality score reaches [`AUTO_APPROVE_THRESHOLD`].
    pub auto_approvable: bool,
}

impl Chunk {
    /// Creates a new chunk.
    ///
    /// The auto-approval flag in `metadata` is derived from `quality_score`.
    #[must_use]
    pub fn new(index: usize, content: String, quality_score: u8, metadata: ChunkMetadata) -> Self {
        let quality_score = quality_score.min(100);
        Self {
            index,
            content,
            quality_score,
            metadata: ChunkMetadata {
                auto_approvable: quality_score >= AUTO_APPROVE_THRESHOLD,
                ..metadata
            },
        }
    }

    /// Returns the size of the chunk content in characters.
    #[must_use]
    pub fn size(&self) -> usize {
        char_len(&self.content)
    }

    /// Checks if the chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Character range of the primary content in the original text.
    #[must_use]
    pub const fn char_range(&self) -> Range<usize> {
        self.metadata.start_offset..self.metadata.end_offset
    }

    /// Whether the chunk may be accepted without human review.
    #[must_use]
    pub const fn is_auto_approvable(&self) -> bool {
        self.quality_score >= AUTO_APPROVE_THRESHOLD
    }

    /// Returns the first `max_chars` characters of the content.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> &str {
        &self.content[..byte_offset_of_char(&self.content, max_chars)]
    }
}
