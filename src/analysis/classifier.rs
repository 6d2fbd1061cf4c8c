//! Document-type classification.
//!
//! Rules are evaluated in priority order: legal, faq, technical, general.
//! Legal wins over faq because sizing contractual text with faq defaults
//! fragments clauses.

use super::structure::{count_qa_pairs, is_markdown_header};
use crate::core::DocumentType;
use crate::io::unicode::{char_len, lines_with_offsets};

/// Minimum number of `제N조` article markers that marks a legal text.
pub const MIN_LEGAL_ARTICLES: usize = 2;

/// Minimum number of complete Q&A pairs that marks an FAQ.
pub const MIN_FAQ_PAIRS: usize = 2;

/// Minimum keyword hits for a keyword-density rule to fire.
pub const MIN_KEYWORD_HITS: usize = 3;

/// Minimum keyword hits per 1,000 characters for a keyword-density rule.
pub const MIN_KEYWORD_DENSITY: f64 = 2.0;

/// Legal-register vocabulary.
pub const LEGAL_KEYWORDS: [&str; 8] = [
    "약관", "조항", "책임", "효력", "계약", "위반", "hereby", "liability",
];

/// Technical vocabulary.
pub const TECHNICAL_KEYWORDS: [&str; 8] = [
    "설치", "API", "SDK", "명령어", "코드", "함수", "install", "config",
];

/// Headings that mark an FAQ explicitly.
pub const FAQ_HEADINGS: [&str; 2] = ["FAQ", "자주 묻는 질문"];

/// Assigns a document type from structural and keyword signals.
///
/// # Examples
///
/// ```
/// use smartchunk::analysis::classify_document_type;
/// use smartchunk::core::DocumentType;
///
/// let faq = "Q: 환불이 되나요?\nA: 네, 7일 이내 가능합니다.\n\nQ: 배송은요?\nA: 3일 걸립니다.";
/// assert_eq!(classify_document_type(faq), DocumentType::Faq);
/// assert_eq!(classify_document_type("오늘은 날씨가 좋습니다."), DocumentType::General);
/// ```
#[must_use]
pub fn classify_document_type(text: &str) -> DocumentType {
    if is_legal(text) {
        DocumentType::Legal
    } else if is_faq(text) {
        DocumentType::Faq
    } else if is_technical(text) {
        DocumentType::Technical
    } else {
        DocumentType::General
    }
}

fn is_legal(text: &str) -> bool {
    count_article_markers(text) >= MIN_LEGAL_ARTICLES
        || keyword_density_exceeds(text, &LEGAL_KEYWORDS)
}

fn is_faq(text: &str) -> bool {
    count_qa_pairs(text) >= MIN_FAQ_PAIRS || has_faq_heading(text)
}

fn is_technical(text: &str) -> bool {
    text.matches("```").count() >= 2 || keyword_density_exceeds(text, &TECHNICAL_KEYWORDS)
}

/// Counts `제N조` clause markers (`제1조`, `제 12 조`).
#[must_use]
pub fn count_article_markers(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '제' {
            let mut j = i + 1;
            while chars.get(j) == Some(&' ') {
                j += 1;
            }
            let digits_start = j;
            while chars.get(j).is_some_and(char::is_ascii_digit) {
                j += 1;
            }
            let has_digits = j > digits_start;
            while chars.get(j) == Some(&' ') {
                j += 1;
            }
            if has_digits && chars.get(j) == Some(&'조') {
                count += 1;
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }
    count
}

/// Total occurrences of any keyword in `text`.
#[must_use]
pub fn keyword_hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().map(|k| text.matches(k).count()).sum()
}

#[allow(clippy::cast_precision_loss)]
fn keyword_density_exceeds(text: &str, keywords: &[&str]) -> bool {
    let hits = keyword_hits(text, keywords);
    if hits < MIN_KEYWORD_HITS {
        return false;
    }
    let chars = char_len(text).max(1);
    hits as f64 * 1000.0 / chars as f64 >= MIN_KEYWORD_DENSITY
}

fn has_faq_heading(text: &str) -> bool {
    lines_with_offsets(text).any(|(_, line)| {
        let trimmed = line.trim();
        let heading = is_markdown_header(line) || FAQ_HEADINGS.contains(&trimmed);
        heading && FAQ_HEADINGS.iter().any(|h| trimmed.contains(h))
    })
}
