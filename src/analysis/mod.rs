//! Read-only text analysis.
//!
//! Every function here is a pure scan over its input:
//!
//! - **Language**: Korean / English / mixed by script counts
//! - **Structure**: headers, Q&A labels, tables, lists
//! - **Classifier**: faq / technical / legal / general document type
//! - **Sentence**: Korean-aware sentence segmentation

pub mod classifier;
pub mod language;
pub mod sentence;
pub mod structure;

pub use classifier::classify_document_type;
pub use language::detect_language;
pub use sentence::{Sentence, segment_sentences, sentence_bodies};
pub use structure::{analyze_structure, count_qa_pairs};
