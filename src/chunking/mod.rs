//! Chunking pipeline for smartchunk.
//!
//! Turns a plain-text document into scored, retrieval-ready chunks:
//!
//! - **Config**: caller options and their resolution to concrete sizes
//! - **Splitter**: structural units, sentence grouping and overlap
//! - **Smart**: the orchestrator tying analysis, splitting and scoring together
//! - **Parallel**: rayon-backed batch chunking over many documents
//! - **Report**: document-level summary of a chunking run

pub mod config;
pub mod parallel;
pub mod report;
pub mod smart;
pub mod splitter;
pub mod traits;

pub use config::{ChunkingOptions, ResolvedConfig, default_chunk_size, resolve_config};
pub use parallel::{ParallelChunker, chunk_documents};
pub use report::{ChunkingReport, summarize};
pub use smart::{SmartChunker, smart_chunk, smart_chunk_async};
pub use splitter::{RawChunk, split};
pub use traits::Chunker;

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default overlap size in characters.
pub const DEFAULT_OVERLAP: usize = 50;

/// Smallest chunk size a configuration is clamped to.
pub const MIN_CHUNK_SIZE: usize = 50;

/// Largest chunk size a configuration is clamped to.
pub const MAX_CHUNK_SIZE: usize = 100_000;

