//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::analysis::{
    analyze_structure, classify_document_type, count_qa_pairs, detect_language, sentence_bodies,
};
use crate::chunking::{ChunkingOptions, ParallelChunker, SmartChunker, summarize};
use crate::cli::output::{
    ChunkedDocument, DocumentAnalysis, OutputFormat, format_analysis, format_chunked,
    format_readability,
};
use crate::cli::parser::{Cli, Commands};
use crate::error::{CommandError, Error, Result};
use crate::io::reader::STDIN_PATH;
use crate::io::unicode::char_len;
use crate::io::{DocumentFile, read_input};
use crate::scoring::calculate_readability_score;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if an input cannot be read, the options file is
/// invalid, or the arguments are inconsistent.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::from_name(&cli.format).ok_or_else(|| {
        CommandError::UnknownFormat(cli.format.clone())
    })?;

    match &cli.command {
        Commands::Chunk { inputs, config, .. } => {
            let options = load_options(config.as_deref())?.merge(cli.command.chunking_overrides());
            cmd_chunk(inputs, options, format)
        }
        Commands::Analyze { input } => cmd_analyze(input, format),
        Commands::Readability { input } => cmd_readability(input, format),
    }
}

/// Reads chunking options from a JSON file, or defaults without one.
fn load_options(path: Option<&Path>) -> Result<ChunkingOptions> {
    let Some(path) = path else {
        return Ok(ChunkingOptions::default());
    };
    let json = DocumentFile::open(path)?.read_text()?;
    let options = ChunkingOptions::from_json(&json).map_err(|e| Error::Config {
        message: format!("{}: {e}", path.display()),
    })?;
    debug!(path = %path.display(), ?options, "loaded options file");
    Ok(options)
}

fn cmd_chunk(inputs: &[PathBuf], options: ChunkingOptions, format: OutputFormat) -> Result<String> {
    if inputs.len() > 1 && inputs.iter().any(|p| is_stdin(p)) {
        return Err(CommandError::InvalidArgument(
            "stdin (-) cannot be combined with other inputs".to_string(),
        )
        .into());
    }

    let texts = inputs.iter().map(read_input).collect::<Result<Vec<_>>>()?;
    let chunker = ParallelChunker::new(SmartChunker::with_options(options));
    let results = chunker.chunk_batch(&texts);

    let documents: Vec<ChunkedDocument> = inputs
        .iter()
        .zip(&texts)
        .zip(results)
        .map(|((path, text), chunks)| ChunkedDocument {
            source: path.display().to_string(),
            report: summarize(text, &chunks),
            chunks,
        })
        .collect();

    info!(
        documents = documents.len(),
        chunks = documents.iter().map(|d| d.chunks.len()).sum::<usize>(),
        "chunked"
    );
    Ok(format_chunked(&documents, format))
}

fn cmd_analyze(input: &Path, format: OutputFormat) -> Result<String> {
    let text = read_input(input)?;
    let analysis = DocumentAnalysis {
        source: input.display().to_string(),
        chars: char_len(&text),
        language: detect_language(&text),
        document_type: classify_document_type(&text),
        structure: analyze_structure(&text),
        qa_pairs: count_qa_pairs(&text),
        sentence_count: sentence_bodies(&text).len(),
    };
    Ok(format_analysis(&analysis, format))
}

fn cmd_readability(input: &Path, format: OutputFormat) -> Result<String> {
    let text = read_input(input)?;
    let score = calculate_readability_score(&text);
    Ok(format_readability(
        &input.display().to_string(),
        score,
        format,
    ))
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}
