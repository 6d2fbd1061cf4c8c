//! I/O utilities for smartchunk.
//!
//! Provides document input for the CLI along with the Unicode helpers the
//! analysis stages are built on.

pub mod reader;
pub mod unicode;

pub use reader::{DocumentFile, read_input};
pub use unicode::{OffsetMap, char_len};
