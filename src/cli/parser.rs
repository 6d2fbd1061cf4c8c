//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::chunking::ChunkingOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// smartchunk: structure-aware document chunking for RAG pipelines.
///
/// Splits plain-text documents into scored, retrieval-ready chunks that
/// respect headers, paragraphs, Q&A pairs and Korean/English sentence
/// boundaries.
#[derive(Parser, Debug)]
#[command(name = "smartchunk")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chunk one or more documents.
    ///
    /// Use `-` to read a single document from stdin. Several files are
    /// chunked in parallel.
    Chunk {
        /// Input files, or `-` for stdin.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Maximum chunk size in characters.
        #[arg(short, long, env = "SMARTCHUNK_MAX_CHUNK_SIZE")]
        max_chunk_size: Option<usize>,

        /// Overlap between consecutive chunks in characters.
        #[arg(short, long, env = "SMARTCHUNK_OVERLAP")]
        overlap: Option<usize>,

        /// Ignore headers, paragraphs and Q&A pairs; split on sentences only.
        #[arg(long)]
        no_preserve_structure: bool,

        /// Detect the document type and size chunks for it.
        #[arg(short, long)]
        auto_detect: bool,

        /// JSON file with chunking options (camelCase keys).
        ///
        /// Flags given on the command line override values from the file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show language, structure and document type of a document.
    Analyze {
        /// Input file, or `-` for stdin.
        input: PathBuf,
    },

    /// Score the readability of a document.
    Readability {
        /// Input file, or `-` for stdin.
        input: PathBuf,
    },
}

impl Commands {
    /// Options set explicitly on the command line, for `chunk`.
    #[must_use]
    pub fn chunking_overrides(&self) -> ChunkingOptions {
        match self {
            Self::Chunk {
                max_chunk_size,
                overlap,
                no_preserve_structure,
                auto_detect,
                ..
            } => ChunkingOptions {
                max_chunk_size: *max_chunk_size,
                overlap: *overlap,
                preserve_structure: no_preserve_structure.then_some(false),
                auto_detect_document_type: auto_detect.then_some(true),
            },
            _ => ChunkingOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_chunk() {
        let cli = Cli::try_parse_from([
            "smartchunk",
            "chunk",
            "doc.txt",
            "--max-chunk-size",
            "300",
            "--auto-detect",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, "json");
        let overrides = cli.command.chunking_overrides();
        assert_eq!(overrides.max_chunk_size, Some(300));
        assert_eq!(overrides.overlap, None);
        assert_eq!(overrides.preserve_structure, None);
        assert_eq!(overrides.auto_detect_document_type, Some(true));
    }

    #[test]
    fn test_parse_no_preserve_structure() {
        let cli = Cli::try_parse_from(["smartchunk", "chunk", "-", "--no-preserve-structure"])
            .unwrap();
        let Commands::Chunk { inputs, .. } = &cli.command else {
            unreachable!("parsed a chunk command");
        };
        assert_eq!(inputs, &vec![PathBuf::from("-")]);
        assert_eq!(cli.command.chunking_overrides().preserve_structure, Some(false));
    }

    #[test]
    fn test_chunk_requires_input() {
        assert!(Cli::try_parse_from(["smartchunk", "chunk"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["smartchunk", "analyze", "doc.txt", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Analyze { .. }));
    }
}
