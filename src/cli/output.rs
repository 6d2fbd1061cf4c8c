//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::chunking::ChunkingReport;
use crate::core::{Chunk, DocumentStructure, DocumentType, Language};
use crate::error::Error;
use serde::Serialize;
use std::fmt::Write;

/// Characters of content shown per chunk in text output.
const PREVIEW_CHARS: usize = 40;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string, falling back to text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self::from_name(s).unwrap_or(Self::Text)
    }

    /// Parses format from string, rejecting unknown names.
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Chunks of one input document with their summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkedDocument {
    /// Where the document came from (`-` for stdin).
    pub source: String,
    /// Document-level summary.
    pub report: ChunkingReport,
    /// The surviving chunks.
    pub chunks: Vec<Chunk>,
}

/// Analysis of one input document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    /// Where the document came from.
    pub source: String,
    /// Length in characters.
    pub chars: usize,
    /// Dominant script.
    pub language: Language,
    /// Classified document type.
    pub document_type: DocumentType,
    /// Structural flags.
    pub structure: DocumentStructure,
    /// Complete question/answer pairs.
    pub qa_pairs: usize,
    /// Non-blank sentences.
    pub sentence_count: usize,
}

/// Formats chunking results, one entry per input document.
#[must_use]
pub fn format_chunked(documents: &[ChunkedDocument], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => documents
            .iter()
            .map(format_chunked_text)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => match documents {
            [single] => format_json(single),
            _ => format_json(&documents),
        },
    }
}

fn format_chunked_text(document: &ChunkedDocument) -> String {
    let report = &document.report;
    let mut output = String::new();

    let _ = writeln!(output, "Document: {}", document.source);
    let _ = writeln!(output, "  Characters:     {}", report.chars);
    let _ = writeln!(output, "  Language:       {}", report.language);
    let _ = writeln!(output, "  Document type:  {}", report.document_type);
    let _ = writeln!(
        output,
        "  Chunks:         {} ({} auto-approvable)",
        report.chunk_count, report.auto_approvable
    );
    let _ = writeln!(output, "  Avg quality:    {:.1}", report.average_quality);

    if document.chunks.is_empty() {
        output.push_str("\nNo chunks produced.\n");
        return output;
    }

    output.push('\n');
    let _ = writeln!(
        output,
        "{:<6} {:<8} {:<8} {:<6} {:<8} {:<6} Preview",
        "Index", "Start", "End", "Size", "Quality", "Flags"
    );
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for chunk in &document.chunks {
        let _ = writeln!(
            output,
            "{:<6} {:<8} {:<8} {:<6} {:<8} {:<6} {}",
            chunk.index,
            chunk.metadata.start_offset,
            chunk.metadata.end_offset,
            chunk.size(),
            chunk.quality_score,
            chunk_flags(chunk),
            preview(chunk)
        );
    }

    output
}

/// One letter per set flag: `q`a pair, `h`eader, `l`ist, `t`able,
/// `o`verlap, `a`uto-approvable.
fn chunk_flags(chunk: &Chunk) -> String {
    let meta = &chunk.metadata;
    [
        (meta.is_qa_pair, 'q'),
        (meta.has_header, 'h'),
        (meta.is_list, 'l'),
        (meta.is_table, 't'),
        (meta.has_overlap, 'o'),
        (meta.auto_approvable, 'a'),
    ]
    .iter()
    .map(|&(set, letter)| if set { letter } else { '-' })
    .collect()
}

fn preview(chunk: &Chunk) -> String {
    let head = chunk.preview(PREVIEW_CHARS).replace('\n', "\\n");
    if chunk.size() > PREVIEW_CHARS {
        format!("{head}...")
    } else {
        head
    }
}

/// Formats a document analysis.
#[must_use]
pub fn format_analysis(analysis: &DocumentAnalysis, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let s = &analysis.structure;
            let mut output = String::new();
            let _ = writeln!(output, "Document: {}", analysis.source);
            let _ = writeln!(output, "  Characters:     {}", analysis.chars);
            let _ = writeln!(output, "  Language:       {}", analysis.language);
            let _ = writeln!(output, "  Document type:  {}", analysis.document_type);
            let _ = writeln!(output, "  Sentences:      {}", analysis.sentence_count);
            let _ = writeln!(output, "  Headers:        {}", yes_no(s.has_headers));
            let _ = writeln!(
                output,
                "  Q&A pairs:      {} ({} complete)",
                yes_no(s.has_qa_pairs),
                analysis.qa_pairs
            );
            let _ = writeln!(output, "  Tables:         {}", yes_no(s.has_tables));
            let _ = writeln!(output, "  Lists:          {}", yes_no(s.has_lists));
            output
        }
        OutputFormat::Json => format_json(analysis),
    }
}

/// Formats a readability score.
#[must_use]
pub fn format_readability(source: &str, score: u8, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{source}: readability {score}/100\n"),
        OutputFormat::Json => {
            #[derive(Serialize)]
            #[serde(rename_all = "camelCase")]
            struct ReadabilityOutput<'a> {
                source: &'a str,
                readability_score: u8,
            }
            format_json(&ReadabilityOutput {
                source,
                readability_score: score,
            })
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }
            format_json(&ErrorOutput {
                error: error.to_string(),
            })
        }
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    let mut json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    json.push('\n');
    json
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
