//! Chunking orchestrator.
//!
//! Runs the full pipeline over one document: structure analysis, optional
//! document-type detection, configuration resolution, boundary-preserving
//! splitting, then scoring and filtering. Surviving chunks are indexed
//! densely from 0 and carry full metadata.

use super::config::{ChunkingOptions, resolve_config};
use super::splitter::{RawChunk, split};
use super::traits::Chunker;
use crate::analysis::classifier::classify_document_type;
use crate::analysis::language::detect_language;
use crate::analysis::structure::{analyze_structure, has_complete_qa};
use crate::core::{Chunk, ChunkMetadata, DocumentType};
use crate::io::unicode::char_len;
use crate::scoring::quality::{QualityAssessment, assess_chunk};
use tracing::{debug, trace};

/// Chunks `text` into scored, retrieval-ready chunks.
///
/// Never fails: empty, whitespace-only or header-only input yields an
/// empty list, and out-of-range options are clamped.
///
/// # Examples
///
/// ```
/// use smartchunk::chunking::{ChunkingOptions, smart_chunk};
///
/// let text = "Q: 질문입니다 충분히 길게.\nA: 답변입니다 충분히 길게.";
/// let chunks = smart_chunk(text, &ChunkingOptions::default());
/// assert_eq!(chunks.len(), 1);
/// assert!(chunks[0].metadata.is_qa_pair);
///
/// assert!(smart_chunk("## Title\n\n## Another", &ChunkingOptions::default()).is_empty());
/// ```
#[must_use]
pub fn smart_chunk(text: &str, options: &ChunkingOptions) -> Vec<Chunk> {
    let structure = analyze_structure(text);
    let detected = options.auto_detects().then(|| classify_document_type(text));
    let config = resolve_config(options, detected);
    debug!(
        chars = char_len(text),
        ?structure,
        document_type = ?config.document_type,
        max_chunk_size = config.max_chunk_size,
        overlap = config.overlap,
        preserve_structure = config.preserve_structure,
        "resolved chunking config"
    );

    let raw_chunks = split(text, &config);
    let raw_count = raw_chunks.len();

    let chunks: Vec<Chunk> = raw_chunks
        .into_iter()
        .filter_map(|raw| {
            let assessment = assess_chunk(raw.content);
            if !assessment.keep {
                trace!(
                    start = raw.start_offset,
                    end = raw.end_offset,
                    "dropped chunk without meaningful content"
                );
                return None;
            }
            Some((raw, assessment))
        })
        .enumerate()
        .map(|(index, (raw, assessment))| {
            build_chunk(index, &raw, &assessment, config.document_type)
        })
        .collect();

    debug!(raw = raw_count, kept = chunks.len(), "chunking complete");
    chunks
}

/// [`smart_chunk`] for async callers.
///
/// Nothing inside suspends; the future completes on its first poll.
#[allow(clippy::unused_async)]
pub async fn smart_chunk_async(text: &str, options: &ChunkingOptions) -> Vec<Chunk> {
    smart_chunk(text, options)
}

fn build_chunk(
    index: usize,
    raw: &RawChunk<'_>,
    assessment: &QualityAssessment,
    document_type: Option<DocumentType>,
) -> Chunk {
    let structure = analyze_structure(raw.content);
    let signals = &assessment.signals;

    let metadata = ChunkMetadata {
        start_offset: raw.start_offset,
        end_offset: raw.end_offset,
        is_qa_pair: has_complete_qa(raw.content),
        has_header: structure.has_headers,
        is_table: structure.has_tables,
        is_list: structure.has_lists,
        language: detect_language(raw.content),
        readability_score: signals.readability,
        sentence_count: signals.sentence_count,
        avg_sentence_length: signals.avg_sentence_length(),
        document_type,
        has_overlap: raw.has_overlap,
        auto_approvable: false,
    };

    Chunk::new(index, raw.content.to_string(), assessment.score, metadata)
}

/// The default chunking strategy: [`smart_chunk`] with fixed options.
///
/// # Examples
///
/// ```
/// use smartchunk::chunking::{Chunker, ChunkingOptions, SmartChunker};
///
/// let chunker = SmartChunker::with_options(ChunkingOptions::new().max_chunk_size(300));
/// assert_eq!(chunker.name(), "smart");
/// assert_eq!(chunker.options().max_chunk_size, Some(300));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartChunker {
    options: ChunkingOptions,
}

impl SmartChunker {
    /// Creates a chunker with default options.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_options(ChunkingOptions::new())
    }

    /// Creates a chunker with the given options.
    #[must_use]
    pub const fn with_options(options: ChunkingOptions) -> Self {
        Self { options }
    }

    /// Returns the options this chunker runs with.
    #[must_use]
    pub const fn options(&self) -> &ChunkingOptions {
        &self.options
    }
}

impl Chunker for SmartChunker {
    fn chunk(&self, text: &str) -> Vec<Chunk> {
        smart_chunk(text, &self.options)
    }

    fn name(&self) -> &'static str {
        "smart"
    }

    fn description(&self) -> &'static str {
        "Structure-aware chunking with sentence boundaries, overlap and quality filtering"
    }
}
