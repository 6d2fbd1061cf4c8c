//! Document-level labels produced by the analysis stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dominant script of a text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Korean (Hangul) dominates.
    #[serde(rename = "ko")]
    Korean,
    /// English (Latin script) dominates.
    #[serde(rename = "en")]
    English,
    /// Both scripts are balanced, or there are no letters at all.
    #[default]
    #[serde(rename = "mixed")]
    Mixed,
}

impl Language {
    /// Short label used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Korean => "ko",
            Self::English => "en",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse content genre; drives adaptive chunk sizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Question/answer collections.
    Faq,
    /// Manuals, API docs, anything with code.
    Technical,
    /// Terms, contracts, policies.
    Legal,
    /// Everything else.
    #[default]
    General,
}

impl DocumentType {
    /// Short label used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::Technical => "technical",
            Self::Legal => "legal",
            Self::General => "general",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural features found in a text. Flags are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStructure {
    /// At least one markdown or underline-style header.
    pub has_headers: bool,
    /// At least one Q&A label line.
    #[serde(rename = "hasQAPairs")]
    pub has_qa_pairs: bool,
    /// At least one table row.
    pub has_tables: bool,
    /// At least one list item.
    pub has_lists: bool,
}
