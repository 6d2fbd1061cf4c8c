//! Chunker trait definition.
//!
//! The seam between callers and chunking strategies. Strategies are total:
//! any input produces a (possibly empty) chunk list, never an error.

use crate::core::Chunk;

/// Trait for chunking a document into scored, retrieval-ready chunks.
///
/// Implementations must be `Send + Sync` so that batches of documents can
/// be chunked concurrently, and must be deterministic: the same input
/// always yields the same chunks.
///
/// # Examples
///
/// ```
/// use smartchunk::chunking::{Chunker, SmartChunker};
///
/// let chunker = SmartChunker::new();
/// let text = "회원 가입은 홈페이지에서 할 수 있습니다. 이메일 인증이 필요합니다.";
/// let chunks = chunker.chunk(text);
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].index, 0);
/// ```
pub trait Chunker: Send + Sync {
    /// Chunks `text`. Indices of the returned chunks are dense from 0.
    fn chunk(&self, text: &str) -> Vec<Chunk>;

    /// Returns the name of the chunking strategy.
    fn name(&self) -> &'static str;

    /// Returns whether this chunker processes work in parallel.
    fn supports_parallel(&self) -> bool {
        false
    }

    /// Returns a description of the chunking strategy.
    fn description(&self) -> &'static str {
        "No description available"
    }
}
