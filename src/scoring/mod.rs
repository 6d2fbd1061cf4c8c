//! Readability and quality scoring.
//!
//! - **Readability**: how well-formed a span of text is (sentence length,
//!   vocabulary diversity, completeness)
//! - **Quality**: how fit a finished chunk is for retrieval, plus the filter
//!   that drops header-only and too-short chunks

pub mod quality;
pub mod readability;

pub use quality::{
    ChunkSignals, MIN_MEANINGFUL_CHARS, QualityAssessment, assess_chunk,
    is_header_or_separator_only, quality_score,
};
pub use readability::calculate_readability_score;
