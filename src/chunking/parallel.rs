//! Parallel batch chunking.
//!
//! Wraps another chunker and chunks many documents at once using rayon.
//! Documents share no state, so each one is chunked independently and the
//! per-document results come back in input order.

use crate::chunking::config::ChunkingOptions;
use crate::chunking::smart::SmartChunker;
use crate::chunking::traits::Chunker;
use crate::core::Chunk;
use rayon::prelude::*;
use tracing::debug;

/// Batch chunking orchestrator.
///
/// # Examples
///
/// ```
/// use smartchunk::chunking::{ParallelChunker, SmartChunker};
///
/// let chunker = ParallelChunker::new(SmartChunker::new());
/// let docs = [
///     "첫 번째 문서입니다. 충분히 긴 내용을 담고 있습니다.",
///     "The second document. It is long enough to keep.",
/// ];
/// let results = chunker.chunk_batch(&docs);
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[1][0].content, docs[1]);
/// ```
#[derive(Debug, Clone)]
pub struct ParallelChunker<C: Chunker> {
    /// The inner chunker to use for each document.
    inner: C,
    /// Minimum batch size to enable parallel processing.
    min_parallel_batch: usize,
}

impl<C: Chunker> ParallelChunker<C> {
    /// Creates a new parallel chunker wrapping the given chunker.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self {
            inner,
            min_parallel_batch: 2,
        }
    }

    /// Sets the minimum batch size for parallel processing.
    ///
    /// Smaller batches are chunked sequentially.
    #[must_use]
    pub const fn min_parallel_batch(mut self, size: usize) -> Self {
        self.min_parallel_batch = size;
        self
    }

    /// Returns the wrapped chunker.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    /// Chunks every document, returning one chunk list per document in
    /// input order.
    #[must_use]
    pub fn chunk_batch<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Vec<Vec<Chunk>> {
        if documents.len() < self.min_parallel_batch {
            return documents
                .iter()
                .map(|doc| self.inner.chunk(doc.as_ref()))
                .collect();
        }

        debug!(
            documents = documents.len(),
            strategy = self.inner.name(),
            "chunking batch in parallel"
        );
        documents
            .par_iter()
            .map(|doc| self.inner.chunk(doc.as_ref()))
            .collect()
    }
}

impl<C: Chunker> Chunker for ParallelChunker<C> {
    fn chunk(&self, text: &str) -> Vec<Chunk> {
        self.inner.chunk(text)
    }

    fn name(&self) -> &'static str {
        "parallel"
    }

    fn supports_parallel(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Parallel batch chunking using rayon for multi-threaded processing"
    }
}

/// Chunks a batch of documents with [`SmartChunker`] in parallel.
#[must_use]
pub fn chunk_documents<S: AsRef<str> + Sync>(
    documents: &[S],
    options: &ChunkingOptions,
) -> Vec<Vec<Chunk>> {
    ParallelChunker::new(SmartChunker::with_options(*options)).chunk_batch(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::smart_chunk;

    fn corpus() -> Vec<String> {
        (0..16)
            .map(|i| format!("문서 {i}번의 첫 문장입니다. 두 번째 문장도 충분히 깁니다. ").repeat(i + 1))
            .collect()
    }

    #[test]
    fn test_batch_matches_sequential() {
        let docs = corpus();
        let options = ChunkingOptions::new().max_chunk_size(120);
        let parallel = chunk_documents(&docs, &options);
        assert_eq!(parallel.len(), docs.len());
        for (doc, chunks) in docs.iter().zip(&parallel) {
            assert_eq!(chunks, &smart_chunk(doc, &options));
        }
    }

    #[test]
    fn test_small_batch_sequential() {
        let chunker = ParallelChunker::new(SmartChunker::new()).min_parallel_batch(100);
        let docs = corpus();
        let results = chunker.chunk_batch(&docs);
        assert_eq!(results.len(), docs.len());
        assert!(results.iter().all(|chunks| !chunks.is_empty()));
    }

    #[test]
    fn test_empty_batch() {
        let docs: [&str; 0] = [];
        assert!(ParallelChunker::new(SmartChunker::new()).chunk_batch(&docs).is_empty());
    }

    #[test]
    fn test_single_document_delegates() {
        let chunker = ParallelChunker::new(SmartChunker::new());
        let text = "The service starts today. Support is available by email.";
        assert_eq!(chunker.chunk(text), SmartChunker::new().chunk(text));
        assert_eq!(chunker.inner().name(), "smart");
    }

    #[test]
    fn test_strategy_name() {
        let chunker = ParallelChunker::new(SmartChunker::new());
        assert_eq!(chunker.name(), "parallel");
        assert!(chunker.supports_parallel());
        assert!(chunker.description().contains("Parallel"));
    }
}
