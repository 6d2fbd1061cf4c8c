//! Error types for smartchunk.
//!
//! The chunking engine is a total function and never fails; these errors
//! cover the surfaces around it: reading input, loading an options file and
//! interpreting the command line.

use thiserror::Error;

/// Result type alias for smartchunk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a surface around the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// A document or options file could not be read.
    #[error("input error: {0}")]
    Io(#[from] IoError),

    /// The command line was inconsistent.
    #[error("usage error: {0}")]
    Command(#[from] CommandError),

    /// An options file was not a valid chunking options object.
    #[error("invalid options: {message}")]
    Config {
        /// What was wrong, prefixed with the file when known.
        message: String,
    },
}

/// Document input failures.
#[derive(Error, Debug)]
pub enum IoError {
    /// Nothing exists at the path.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: String,
    },

    /// Opening or reading failed.
    #[error("cannot read {path}: {reason}")]
    ReadFailed {
        /// The path being read (`-` for stdin).
        path: String,
        /// The underlying OS error.
        reason: String,
    },

    /// A large document could not be memory-mapped.
    #[error("cannot map {path} into memory: {reason}")]
    MmapFailed {
        /// The path being mapped.
        path: String,
        /// The underlying OS error.
        reason: String,
    },

    /// The document is not UTF-8 text.
    #[error("{path} is not valid UTF-8 (first bad byte at offset {offset})")]
    InvalidUtf8 {
        /// The path being decoded (`-` for stdin).
        path: String,
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },

    /// The document exceeds the size limit.
    #[error("{path} is {size} bytes, above the {limit}-byte limit")]
    TooLarge {
        /// The oversized path.
        path: String,
        /// Its size in bytes.
        size: u64,
        /// The accepted maximum.
        limit: u64,
    },
}

/// Command-line usage failures.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Arguments that cannot be used together.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `--format` named a format that does not exist.
    #[error("unknown output format '{0}' (expected text or json)")]
    UnknownFormat(String),
}
