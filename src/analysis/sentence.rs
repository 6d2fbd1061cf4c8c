//! Korean/English sentence segmentation.
//!
//! The segmenter partitions a text into contiguous spans, one per sentence.
//! Each span owns its trailing whitespace, so concatenating the spans yields
//! the input byte-for-byte. Boundaries fire on:
//!
//! - Western or full-width terminal punctuation followed by whitespace or
//!   the end of the text, outside abbreviations, initials and list numbers;
//! - Korean sentence-final endings (formal `-니다`/`-니까`, informal `-요`,
//!   `-죠`) followed by whitespace;
//! - paragraph breaks (a blank line), unconditionally;
//! - a single newline when the current line is a header or the next line
//!   opens a structural element (header, bullet, Q&A label, table row).
//!
//! Run-on text without any of these is never force-split.

use super::structure::{is_markdown_header, opens_structural_line};
use crate::io::unicode::{char_len, is_closing_mark, is_hangul, is_terminal_punct};

/// Formal-register endings.
const FORMAL_ENDINGS: [&str; 2] = ["니다", "니까"];

/// Syllables before `요` that form nouns rather than polite endings
/// (`필요`, `중요`, `개요`, ...).
const NOUN_YO_PREFIXES: [char; 9] = ['필', '중', '주', '수', '강', '소', '개', '동', '불'];

/// Particles that never open a sentence when they stand alone.
const STANDALONE_PARTICLES: [char; 6] = ['을', '를', '이', '가', '은', '는'];

/// Words whose trailing period does not end a sentence.
const ABBREVIATIONS: [&str; 12] = [
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "no", "fig", "approx",
];

/// One sentence span of a larger text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// The span, including surrounding whitespace it owns.
    pub text: &'a str,
    /// Byte offset of the span in the segmented text.
    pub start: usize,
}

impl<'a> Sentence<'a> {
    /// Byte offset one past the span.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// The sentence without surrounding whitespace.
    #[must_use]
    pub fn body(&self) -> &'a str {
        self.text.trim()
    }

    /// Byte offset of the first non-whitespace character.
    #[must_use]
    pub fn body_start(&self) -> usize {
        self.start + (self.text.len() - self.text.trim_start().len())
    }

    /// Byte offset one past the last non-whitespace character.
    #[must_use]
    pub fn body_end(&self) -> usize {
        self.start + self.text.trim_end().len()
    }

    /// Whether the span holds only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.body().is_empty()
    }

    /// Length of the body in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        char_len(self.body())
    }
}

/// Splits `text` into sentence spans that together cover it exactly.
///
/// # Examples
///
/// ```
/// use smartchunk::analysis::segment_sentences;
///
/// let text = "감사합니다 다음 안내입니다. Next one! Done";
/// let bodies: Vec<_> = segment_sentences(text).iter().map(|s| s.body()).collect();
/// assert_eq!(bodies, vec!["감사합니다", "다음 안내입니다.", "Next one!", "Done"]);
/// ```
#[must_use]
pub fn segment_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut starts = vec![0];
    starts.extend(find_boundaries(text));

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            Sentence {
                text: &text[start..end],
                start,
            }
        })
        .filter(|s| !s.text.is_empty())
        .collect()
}

/// Non-blank sentence bodies of `text`.
#[must_use]
pub fn sentence_bodies(text: &str) -> Vec<&str> {
    segment_sentences(text)
        .into_iter()
        .filter(|s| !s.is_blank())
        .map(|s| s.body())
        .collect()
}

/// Whether `text`, trimmed, ends the way a complete sentence does.
#[must_use]
pub fn ends_with_terminal(text: &str) -> bool {
    let trimmed = text.trim_end().trim_end_matches(is_closing_mark);
    trimmed.chars().next_back().is_some_and(is_terminal_punct)
        || ends_with_korean_final(trimmed)
        || trimmed.ends_with('다')
}

/// Whether `text` ends with a Korean sentence-final ending.
#[must_use]
pub fn ends_with_korean_final(text: &str) -> bool {
    if FORMAL_ENDINGS.iter().any(|e| text.ends_with(e)) || text.ends_with('죠') {
        return true;
    }
    let mut tail = text.chars().rev();
    tail.next() == Some('요')
        && tail
            .next()
            .is_some_and(|c| is_hangul(c) && !NOUN_YO_PREFIXES.contains(&c))
}

/// Start offsets (bytes) of every sentence after the first.
fn find_boundaries(text: &str) -> Vec<usize> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |k: usize| chars.get(k).map_or(text.len(), |&(b, _)| b);
    let skip_ws = |mut k: usize| {
        while chars.get(k).is_some_and(|&(_, c)| c.is_whitespace()) {
            k += 1;
        }
        k
    };

    let mut boundaries = Vec::new();
    let mut line_start = 0;
    let mut has_body = false;
    let mut i = 0;

    while i < chars.len() {
        let (byte, c) = chars[i];

        let candidate = if c == '\n' {
            let next_line = &text[byte + 1..];
            let next_line = next_line.split('\n').next().unwrap_or_default();
            let current_line = &text[line_start..byte];
            line_start = byte + 1;
            if is_paragraph_break(&chars, i) {
                Some((skip_ws(i), true))
            } else if is_markdown_header(current_line) || opens_structural_line(next_line) {
                Some((skip_ws(i), false))
            } else {
                None
            }
        } else if is_terminal_punct(c) {
            let mut j = i + 1;
            while chars
                .get(j)
                .is_some_and(|&(_, n)| is_terminal_punct(n) || is_closing_mark(n))
            {
                j += 1;
            }
            let followed_by_space = chars.get(j).is_none_or(|&(_, n)| n.is_whitespace());
            (followed_by_space && !(c == '.' && is_non_terminal_period(text, &chars, i)))
                .then(|| (skip_ws(j), false))
        } else if is_hangul(c)
            && chars.get(i + 1).is_some_and(|&(_, n)| n.is_whitespace())
            && ends_with_korean_final(&text[..byte_at(i + 1)])
        {
            Some((skip_ws(i + 1), false))
        } else {
            None
        };

        if !c.is_whitespace() {
            has_body = true;
        }

        match candidate {
            Some((next, hard))
                if has_body && next < chars.len() && (hard || !opens_with_particle(&chars, next)) =>
            {
                boundaries.push(byte_at(next));
                has_body = false;
                line_start = line_start_before(text, byte_at(next));
                i = next;
            }
            _ => i += 1,
        }
    }

    boundaries
}

/// `\n`, optional horizontal whitespace, `\n`.
fn is_paragraph_break(chars: &[(usize, char)], i: usize) -> bool {
    chars[i + 1..]
        .iter()
        .map(|&(_, c)| c)
        .find(|&c| !matches!(c, ' ' | '\t' | '\r'))
        == Some('\n')
}

/// Byte offset of the start of the line containing `byte`.
fn line_start_before(text: &str, byte: usize) -> usize {
    text[..byte].rfind('\n').map_or(0, |p| p + 1)
}

/// A lone particle (`을`, `는`, ...) at `k` belongs to the previous clause.
fn opens_with_particle(chars: &[(usize, char)], k: usize) -> bool {
    chars
        .get(k)
        .is_some_and(|&(_, c)| STANDALONE_PARTICLES.contains(&c))
        && chars
            .get(k + 1)
            .is_none_or(|&(_, n)| n.is_whitespace() || n.is_ascii_punctuation())
}

/// Periods after abbreviations, initials and list numbers.
fn is_non_terminal_period(text: &str, chars: &[(usize, char)], i: usize) -> bool {
    let word_start = chars[..i]
        .iter()
        .rposition(|&(_, c)| !c.is_alphanumeric())
        .map_or(0, |p| p + 1);
    let word: String = chars[word_start..i].iter().map(|&(_, c)| c).collect();
    if word.is_empty() {
        return false;
    }

    let lower = word.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }

    let mut letters = word.chars();
    if let (Some(only), None) = (letters.next(), letters.next()) {
        // "J. Smith", and the last period of "e.g." / "i.e."
        let after_period = word_start > 0 && chars[word_start - 1].1 == '.';
        if only.is_ascii_uppercase() || (only.is_ascii_lowercase() && after_period) {
            return true;
        }
    }

    // "1. First item" at the start of a line
    if word.chars().all(|c| c.is_ascii_digit()) {
        let line = &text[line_start_before(text, chars[word_start].0)..chars[word_start].0];
        return line.trim().is_empty();
    }

    false
}
