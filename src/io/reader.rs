//! Document input for the CLI.
//!
//! Documents arrive as UTF-8 text from an upstream parser. Files under
//! [`MMAP_THRESHOLD`] are read in one pass, larger ones through a read-only
//! memory map, and [`STDIN_PATH`] reads standard input.

// Memory mapping requires unsafe; the map is read-only and short-lived
#![allow(unsafe_code)]

use crate::error::{IoError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files at or above this size (1 MiB) are memory-mapped.
pub const MMAP_THRESHOLD: u64 = 1 << 20;

/// Largest document accepted (256 MiB).
pub const MAX_DOCUMENT_BYTES: u64 = 256 << 20;

/// Path value that selects stdin.
pub const STDIN_PATH: &str = "-";

/// An opened document file.
///
/// # Examples
///
/// ```no_run
/// use smartchunk::io::DocumentFile;
///
/// let text = DocumentFile::open("faq.txt")?.read_text()?;
/// # Ok::<(), smartchunk::Error>(())
/// ```
#[derive(Debug)]
pub struct DocumentFile {
    file: File,
    len: u64,
    path: PathBuf,
}

impl DocumentFile {
    /// Opens a document and checks its size.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] for a missing path,
    /// [`IoError::TooLarge`] above [`MAX_DOCUMENT_BYTES`], and
    /// [`IoError::ReadFailed`] for any other OS error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => IoError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => read_failed(&path, &e),
        })?;

        let len = file.metadata().map_err(|e| read_failed(&path, &e))?.len();
        if len > MAX_DOCUMENT_BYTES {
            return Err(IoError::TooLarge {
                path: path.display().to_string(),
                size: len,
                limit: MAX_DOCUMENT_BYTES,
            }
            .into());
        }

        Ok(Self { file, len, path })
    }

    /// Size of the document in bytes.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Whether the document is zero bytes long.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Path the document was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`read_text`](Self::read_text) goes through a memory map.
    #[must_use]
    pub const fn is_mapped(&self) -> bool {
        self.len >= MMAP_THRESHOLD
    }

    /// Reads the whole document as text.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or mapping fails, or the bytes are not
    /// UTF-8.
    pub fn read_text(&self) -> Result<String> {
        let bytes = if self.is_mapped() {
            self.map_bytes()?
        } else {
            self.read_bytes()?
        };
        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            mapped = self.is_mapped(),
            "read document"
        );
        decode(&self.path, bytes)
    }

    fn map_bytes(&self) -> Result<Vec<u8>> {
        // Safety: the mapping is read-only and copied out before it drops
        let mmap = unsafe { Mmap::map(&self.file) }.map_err(|e| IoError::MmapFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(mmap.to_vec())
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(usize::try_from(self.len).unwrap_or_default());
        (&self.file)
            .read_to_end(&mut bytes)
            .map_err(|e| read_failed(&self.path, &e))?;
        Ok(bytes)
    }
}

/// Reads a document from a path, or from stdin when the path is `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not valid UTF-8.
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if path.as_os_str() != STDIN_PATH {
        return DocumentFile::open(path)?.read_text();
    }

    let mut bytes = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .map_err(|e| read_failed(path, &e))?;
    decode(path, bytes)
}

fn decode(path: &Path, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        IoError::InvalidUtf8 {
            path: path.display().to_string(),
            offset: e.utf8_error().valid_up_to(),
        }
        .into()
    })
}

fn read_failed(path: &Path, err: &std::io::Error) -> IoError {
    IoError::ReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
