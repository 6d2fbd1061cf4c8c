//! Core domain models for smartchunk.
//!
//! Pure data types shared by every stage of the engine: the output chunk,
//! its metadata, and the document-level labels the analyzers produce.

pub mod chunk;
pub mod document;

pub use chunk::{AUTO_APPROVE_THRESHOLD, Chunk, ChunkMetadata};
pub use document::{DocumentStructure, DocumentType, Language};
