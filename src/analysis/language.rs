//! Script-based language detection.

use crate::core::Language;
use crate::io::unicode::{is_hangul, is_latin_letter};

/// Minority/majority letter ratio at which a text counts as mixed.
///
/// 0.4 means neither script outnumbers the other by more than 2.5:1.
pub const MIXED_BALANCE_RATIO: f64 = 0.4;

/// Counts Hangul and Latin letters; everything else is ignored.
#[must_use]
pub fn script_counts(text: &str) -> (usize, usize) {
    text.chars().fold((0, 0), |(ko, en), c| {
        if is_hangul(c) {
            (ko + 1, en)
        } else if is_latin_letter(c) {
            (ko, en + 1)
        } else {
            (ko, en)
        }
    })
}

/// Classifies `text` as Korean, English or mixed by letter counts.
///
/// Text without any letters (empty, digits, symbols) is mixed.
///
/// # Examples
///
/// ```
/// use smartchunk::analysis::detect_language;
/// use smartchunk::core::Language;
///
/// assert_eq!(detect_language("안녕하세요"), Language::Korean);
/// assert_eq!(detect_language("Hello there"), Language::English);
/// assert_eq!(detect_language("Hello 안녕 World 세계"), Language::Mixed);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn detect_language(text: &str) -> Language {
    match script_counts(text) {
        (0, 0) => Language::Mixed,
        (_, 0) => Language::Korean,
        (0, _) => Language::English,
        (ko, en) => {
            let ratio = ko.min(en) as f64 / ko.max(en) as f64;
            if ratio >= MIXED_BALANCE_RATIO {
                Language::Mixed
            } else if ko > en {
                Language::Korean
            } else {
                Language::English
            }
        }
    }
}
