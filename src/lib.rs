//! # smartchunk
//!
//! Structure-aware document chunking and quality scoring for RAG pipelines.
//!
//! smartchunk turns plain text into retrieval-ready chunks. It keeps
//! headers with their paragraphs and questions with their answers, never
//! cuts a Korean or English sentence in half, sizes chunks for the kind of
//! document it is looking at, and scores every chunk so that downstream
//! review can auto-approve the good ones.
//!
//! ## Features
//!
//! - **Analysis**: language, structure and document-type detection
//! - **Segmentation**: Korean-aware sentence boundaries without regexes
//! - **Chunking**: boundary-preserving splitting with sentence-aligned overlap
//! - **Scoring**: readability and quality heuristics plus a drop filter
//! - **Batching**: rayon-backed parallel chunking of many documents
//!
//! ## Example
//!
//! ```
//! use smartchunk::{ChunkingOptions, smart_chunk};
//!
//! let text = "# 배송 안내\n\n주문 후 영업일 기준 3일 이내에 발송됩니다. \
//!             도서 산간 지역은 하루 이틀 더 걸릴 수 있습니다.";
//! let chunks = smart_chunk(text, &ChunkingOptions::default());
//! assert_eq!(chunks.len(), 1);
//! assert!(chunks[0].metadata.has_header);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod analysis;
pub mod chunking;
pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod scoring;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use crate::core::{
    AUTO_APPROVE_THRESHOLD, Chunk, ChunkMetadata, DocumentStructure, DocumentType, Language,
};

// Re-export analysis entry points
pub use analysis::{analyze_structure, classify_document_type, detect_language, segment_sentences};

// Re-export scoring entry points
pub use scoring::{calculate_readability_score, is_header_or_separator_only};

// Re-export chunking types
pub use chunking::{
    Chunker, ChunkingOptions, ParallelChunker, ResolvedConfig, SmartChunker, resolve_config,
    smart_chunk, smart_chunk_async, split,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
