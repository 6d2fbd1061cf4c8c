//! Chunking configuration.
//!
//! [`ChunkingOptions`] is what callers hand in: every field optional,
//! loadable from camelCase JSON. [`resolve_config`] turns it into the
//! concrete [`ResolvedConfig`] the splitter runs with, applying the
//! precedence explicit size > per-type default > global default and
//! clamping nonsensical values instead of rejecting them.

use super::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
use crate::core::DocumentType;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Caller-supplied chunking options.
///
/// # Examples
///
/// ```
/// use smartchunk::chunking::ChunkingOptions;
///
/// let options = ChunkingOptions::new().max_chunk_size(800).overlap(80);
/// assert_eq!(options.max_chunk_size, Some(800));
/// assert!(options.preserves_structure());
/// assert!(!options.auto_detects());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChunkingOptions {
    /// Upper bound on primary chunk content, in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chunk_size: Option<usize>,

    /// Characters of trailing context repeated at the start of the next chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap: Option<usize>,

    /// Split along headers, paragraphs and Q&A pairs first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_structure: Option<bool>,

    /// Classify the document and size chunks for its type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_detect_document_type: Option<bool>,
}

impl ChunkingOptions {
    /// Creates options with nothing set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_chunk_size: None,
            overlap: None,
            preserve_structure: None,
            auto_detect_document_type: None,
        }
    }

    /// Sets the maximum chunk size.
    #[must_use]
    pub const fn max_chunk_size(mut self, size: usize) -> Self {
        self.max_chunk_size = Some(size);
        self
    }

    /// Sets the overlap.
    #[must_use]
    pub const fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = Some(overlap);
        self
    }

    /// Sets whether structural units are respected.
    #[must_use]
    pub const fn preserve_structure(mut self, preserve: bool) -> Self {
        self.preserve_structure = Some(preserve);
        self
    }

    /// Sets whether the document type is detected.
    #[must_use]
    pub const fn auto_detect_document_type(mut self, detect: bool) -> Self {
        self.auto_detect_document_type = Some(detect);
        self
    }

    /// Effective structure preservation (default `true`).
    #[must_use]
    pub fn preserves_structure(&self) -> bool {
        self.preserve_structure.unwrap_or(true)
    }

    /// Effective document-type detection (default `false`).
    #[must_use]
    pub fn auto_detects(&self) -> bool {
        self.auto_detect_document_type.unwrap_or(false)
    }

    /// Returns `self` with every field set in `overrides` replaced.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            max_chunk_size: overrides.max_chunk_size.or(self.max_chunk_size),
            overlap: overrides.overlap.or(self.overlap),
            preserve_structure: overrides.preserve_structure.or(self.preserve_structure),
            auto_detect_document_type: overrides
                .auto_detect_document_type
                .or(self.auto_detect_document_type),
        }
    }

    /// Parses options from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the JSON is malformed or a field has the
    /// wrong type (a negative size, for instance).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config {
            message: format!("invalid chunking options: {e}"),
        })
    }
}

/// Default maximum chunk size for a document type.
#[must_use]
pub const fn default_chunk_size(document_type: DocumentType) -> usize {
    match document_type {
        DocumentType::Faq => 400,
        DocumentType::Technical => 600,
        DocumentType::Legal | DocumentType::General => DEFAULT_CHUNK_SIZE,
    }
}

/// Concrete configuration the splitter runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Upper bound on primary chunk content, in characters.
    pub max_chunk_size: usize,
    /// Overlap in characters, at most half of `max_chunk_size`.
    pub overlap: usize,
    /// Whether structural units are respected.
    pub preserve_structure: bool,
    /// Detected document type, when detection ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_config(&ChunkingOptions::default(), None)
    }
}

/// Resolves caller options against a detected document type.
///
/// `detected` is only consulted when the options enable auto-detection.
///
/// # Examples
///
/// ```
/// use smartchunk::chunking::{ChunkingOptions, resolve_config};
/// use smartchunk::core::DocumentType;
///
/// let auto = ChunkingOptions::new().auto_detect_document_type(true);
/// assert_eq!(resolve_config(&auto, Some(DocumentType::Faq)).max_chunk_size, 400);
///
/// let explicit = auto.max_chunk_size(1000);
/// assert_eq!(resolve_config(&explicit, Some(DocumentType::Faq)).max_chunk_size, 1000);
/// ```
#[must_use]
pub fn resolve_config(options: &ChunkingOptions, detected: Option<DocumentType>) -> ResolvedConfig {
    let document_type = detected.filter(|_| options.auto_detects());

    let requested = options
        .max_chunk_size
        .or_else(|| document_type.map(default_chunk_size))
        .unwrap_or(DEFAULT_CHUNK_SIZE);
    let max_chunk_size = requested.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE);
    if max_chunk_size != requested {
        warn!(
            requested,
            clamped = max_chunk_size,
            "max chunk size out of range"
        );
    }

    let requested_overlap = options.overlap.unwrap_or(DEFAULT_OVERLAP);
    let overlap = requested_overlap.min(max_chunk_size / 2);
    if overlap != requested_overlap {
        warn!(
            requested = requested_overlap,
            clamped = overlap,
            max_chunk_size,
            "overlap capped at half the chunk size"
        );
    }

    ResolvedConfig {
        max_chunk_size,
        overlap,
        preserve_structure: options.preserves_structure(),
        document_type,
    }
}
