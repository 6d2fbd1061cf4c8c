//! Chunk quality scoring and the drop filter.
//!
//! A chunk starts at 70 and collects additive adjustments for length,
//! structure, Q&A integrity, sentence count and readability before being
//! clamped to `0..=100`. Independently, chunks whose meaningful content
//! (everything but headers and separator lines) is under 20 characters are
//! dropped before they reach the output.

use super::readability::calculate_readability_score;
use crate::analysis::sentence::sentence_bodies;
use crate::analysis::structure::{
    is_answer_line, is_list_item, is_markdown_header, is_question_line, mark_header_lines,
};
use crate::io::unicode::{char_len, lines_with_offsets};

/// Starting score before adjustments.
pub const BASE_SCORE: i32 = 70;

/// Chunks with fewer meaningful characters are dropped.
pub const MIN_MEANINGFUL_CHARS: usize = 20;

/// Ideal content length range in characters.
pub const IDEAL_LENGTH: std::ops::RangeInclusive<usize> = 100..=600;

/// Length above which a chunk is considered bloated.
pub const OVERSIZED_LENGTH: usize = 1200;

/// Bonus for landing in [`IDEAL_LENGTH`].
pub const IDEAL_LENGTH_BONUS: i32 = 10;

/// Penalty for content under 100 characters.
pub const SHORT_PENALTY: i32 = -10;

/// Penalty for content above [`OVERSIZED_LENGTH`].
pub const OVERSIZED_PENALTY: i32 = -5;

/// Bonus for a header or list marker inside the chunk.
pub const STRUCTURE_BONUS: i32 = 5;

/// Bonus for a chunk holding both halves of a Q&A pair.
pub const COMPLETE_QA_BONUS: i32 = 15;

/// Penalty for a question without its answer, or the reverse.
pub const BROKEN_QA_PENALTY: i32 = -30;

/// Sentence counts that earn [`SENTENCE_COUNT_BONUS`].
pub const IDEAL_SENTENCES: std::ops::RangeInclusive<usize> = 3..=10;

/// Bonus for a sentence count in [`IDEAL_SENTENCES`].
pub const SENTENCE_COUNT_BONUS: i32 = 5;

/// Readability points per quality point, centred on 50.
pub const READABILITY_DIVISOR: f64 = 5.0;

/// Measured features of one chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkSignals {
    /// Content length in characters (trimmed).
    pub char_len: usize,
    /// Non-blank sentences.
    pub sentence_count: usize,
    /// Characters inside sentence bodies, whitespace between them excluded.
    pub sentence_chars: usize,
    /// Readability score of the content.
    pub readability: u8,
    /// A markdown header line is present.
    pub has_header: bool,
    /// A list item line is present.
    pub has_list: bool,
    /// A question label line is present.
    pub has_question: bool,
    /// An answer label line is present.
    pub has_answer: bool,
}

impl ChunkSignals {
    /// Measures `content`.
    #[must_use]
    pub fn measure(content: &str) -> Self {
        let trimmed = content.trim();
        let sentences = sentence_bodies(trimmed);
        let mut signals = Self {
            char_len: char_len(trimmed),
            sentence_count: sentences.len(),
            sentence_chars: sentences.iter().map(|s| char_len(s)).sum(),
            readability: calculate_readability_score(trimmed),
            ..Self::default()
        };
        for (_, line) in lines_with_offsets(trimmed) {
            signals.has_header |= is_markdown_header(line);
            signals.has_list |= is_list_item(line);
            signals.has_question |= is_question_line(line);
            signals.has_answer |= is_answer_line(line);
        }
        signals
    }

    /// Mean sentence length in characters; 0 when there are no sentences.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_sentence_length(&self) -> f64 {
        if self.sentence_count == 0 {
            0.0
        } else {
            self.sentence_chars as f64 / self.sentence_count as f64
        }
    }
}

/// Scores a chunk from its measured signals.
///
/// # Examples
///
/// ```
/// use smartchunk::scoring::{ChunkSignals, quality_score};
///
/// let pair = ChunkSignals::measure("Q: 환불이 가능한가요?\nA: 구매 후 7일 이내에 가능합니다.");
/// let half = ChunkSignals::measure("Q: 환불이 가능한가요?\n구매 후 7일 이내에 가능합니다.");
/// assert!(quality_score(&pair) > quality_score(&half));
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quality_score(signals: &ChunkSignals) -> u8 {
    let mut score = BASE_SCORE;

    score += if IDEAL_LENGTH.contains(&signals.char_len) {
        IDEAL_LENGTH_BONUS
    } else if signals.char_len < *IDEAL_LENGTH.start() {
        SHORT_PENALTY
    } else if signals.char_len > OVERSIZED_LENGTH {
        OVERSIZED_PENALTY
    } else {
        0
    };

    if signals.has_header || signals.has_list {
        score += STRUCTURE_BONUS;
    }

    score += match (signals.has_question, signals.has_answer) {
        (true, true) => COMPLETE_QA_BONUS,
        (true, false) | (false, true) => BROKEN_QA_PENALTY,
        (false, false) => 0,
    };

    if IDEAL_SENTENCES.contains(&signals.sentence_count) {
        score += SENTENCE_COUNT_BONUS;
    }

    score += readability_contribution(signals.readability);

    score.clamp(0, 100) as u8
}

#[allow(clippy::cast_possible_truncation)]
fn readability_contribution(readability: u8) -> i32 {
    ((f64::from(readability) - 50.0) / READABILITY_DIVISOR).round() as i32
}

/// Characters left after removing header (ATX or setext) and separator
/// lines.
#[must_use]
pub fn meaningful_chars(content: &str) -> usize {
    mark_header_lines(content)
        .into_iter()
        .filter(|&(_, marked)| !marked)
        .map(|(line, _)| char_len(line.trim()))
        .sum()
}

/// Whether a chunk is empty, whitespace, or only headers and separators,
/// leaving under [`MIN_MEANINGFUL_CHARS`] of real content.
#[must_use]
pub fn is_header_or_separator_only(content: &str) -> bool {
    meaningful_chars(content) < MIN_MEANINGFUL_CHARS
}

/// Outcome of scoring one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityAssessment {
    /// The measured signals.
    pub signals: ChunkSignals,
    /// Final quality score, 0-100.
    pub score: u8,
    /// Whether the chunk survives the drop filter.
    pub keep: bool,
}

/// Measures, scores and filters one chunk.
#[must_use]
pub fn assess_chunk(content: &str) -> QualityAssessment {
    let signals = ChunkSignals::measure(content);
    QualityAssessment {
        signals,
        score: quality_score(&signals),
        keep: !is_header_or_separator_only(content),
    }
}
