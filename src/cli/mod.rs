//! CLI layer for smartchunk.
//!
//! Provides the command-line interface using clap, with commands for
//! chunking documents and inspecting their language, structure and
//! readability.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
