//! Unicode utilities for text processing.
//!
//! Character-class predicates for the scripts the engine distinguishes,
//! line iteration with byte offsets, and byte-to-character offset mapping.
//! All size measures in the engine are in Unicode scalar values
//! (`char`s), while slicing happens on byte offsets.

use unicode_segmentation::UnicodeSegmentation;

/// Returns `true` for Hangul syllables and jamo.
///
/// # Examples
///
/// ```
/// use smartchunk::io::unicode::is_hangul;
///
/// assert!(is_hangul('한'));
/// assert!(is_hangul('ㄱ'));
/// assert!(!is_hangul('a'));
/// ```
#[must_use]
pub const fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7A3}'   // syllables
        | '\u{1100}'..='\u{11FF}' // jamo
        | '\u{3130}'..='\u{318F}' // compatibility jamo
        | '\u{A960}'..='\u{A97F}' // jamo extended-A
        | '\u{D7B0}'..='\u{D7FF}' // jamo extended-B
    )
}

/// Returns `true` for Latin-script letters (ASCII and Latin-1/Extended-A/B).
#[must_use]
pub const fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || (matches!(c, '\u{00C0}'..='\u{024F}') && c != '\u{00D7}' && c != '\u{00F7}')
}

/// Returns `true` for sentence-terminal punctuation, ASCII or full-width.
#[must_use]
pub const fn is_terminal_punct(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '。' | '！' | '？' | '…')
}

/// Returns `true` for closing quotes and brackets that may trail terminal
/// punctuation (`He said "no."`).
#[must_use]
pub const fn is_closing_mark(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | ')' | ']' | '}' | '”' | '’' | '」' | '』' | '）' | '》' | '〉'
    )
}

/// Number of Unicode scalar values in `s`.
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Returns the byte offset just past the last `char` of `s` that fits in
/// `max_chars` characters.
#[must_use]
pub fn byte_offset_of_char(s: &str, max_chars: usize) -> usize {
    s.char_indices().nth(max_chars).map_or(s.len(), |(i, _)| i)
}

/// Iterates over lines with their byte offsets.
///
/// The yielded line excludes its terminator (`\n` or `\r\n`); offsets are
/// exact for both terminator styles.
///
/// # Examples
///
/// ```
/// use smartchunk::io::unicode::lines_with_offsets;
///
/// let lines: Vec<_> = lines_with_offsets("a\r\nbb\nc").collect();
/// assert_eq!(lines, vec![(0, "a"), (3, "bb"), (6, "c")]);
/// ```
pub fn lines_with_offsets(s: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    s.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        (start, line)
    })
}

/// Returns `true` if the line holds nothing but whitespace.
#[must_use]
pub fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// Lowercased word tokens, split on Unicode word boundaries.
///
/// Hangul runs and Latin words are both single tokens, which makes this a
/// script-aware tokenizer without a language model.
#[must_use]
pub fn word_tokens(s: &str) -> Vec<String> {
    s.unicode_words().map(str::to_lowercase).collect()
}

/// Maps byte offsets of a string to character offsets.
///
/// Built once per input so that repeated lookups are `O(log n)` instead of
/// rescanning the prefix.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    /// Byte offset of every `char`, in order.
    starts: Vec<usize>,
    /// Total byte length.
    len: usize,
}

impl OffsetMap {
    /// Builds the map for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(i, _)| i).collect(),
            len: text.len(),
        }
    }

    /// Converts a byte offset (on a char boundary) to a char offset.
    ///
    /// Offsets past the end map to the total character count.
    #[must_use]
    pub fn char_offset(&self, byte: usize) -> usize {
        if byte >= self.len {
            return self.starts.len();
        }
        self.starts.partition_point(|&start| start < byte)
    }
}
