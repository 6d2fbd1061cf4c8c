//! Readability heuristic.
//!
//! Starts from 100 and subtracts for long sentences, heavy vocabulary
//! repetition and an incomplete final sentence. The result is clamped to
//! `0..=100`; blank input scores 0.

use crate::analysis::sentence::{ends_with_terminal, sentence_bodies};
use crate::io::unicode::{char_len, word_tokens};
use std::collections::HashSet;

/// Average sentence length (chars) above which the length penalty starts.
pub const LONG_SENTENCE_CHARS: f64 = 100.0;

/// Characters of excess average length per penalty point.
pub const LONG_SENTENCE_STEP: f64 = 5.0;

/// Cap on the sentence-length penalty.
pub const MAX_LENGTH_PENALTY: f64 = 40.0;

/// Unique/total token ratio below which repetition is penalized.
pub const MIN_UNIQUE_RATIO: f64 = 0.5;

/// Penalty points per unit of ratio shortfall.
pub const REPETITION_WEIGHT: f64 = 60.0;

/// Token count below which repetition is not measured.
pub const MIN_TOKENS_FOR_REPETITION: usize = 5;

/// Points a complete final sentence earns over an incomplete one.
pub const COMPLETENESS_BONUS: f64 = 10.0;

/// Scores how well-formed `text` is, from 0 to 100.
///
/// # Examples
///
/// ```
/// use smartchunk::scoring::calculate_readability_score;
///
/// assert_eq!(calculate_readability_score("   "), 0);
/// let complete = calculate_readability_score("서비스를 시작합니다. 곧 안내드리겠습니다.");
/// let cut_off = calculate_readability_score("서비스를 시작합니다. 곧 안내드리겠");
/// assert!(complete >= cut_off);
/// ```
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn calculate_readability_score(text: &str) -> u8 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }

    let sentences = sentence_bodies(trimmed);
    let sentence_count = sentences.len().max(1);
    let total_chars: usize = sentences.iter().map(|s| char_len(s)).sum();
    let average = total_chars as f64 / sentence_count as f64;

    let mut score = 100.0 - COMPLETENESS_BONUS;
    score -= length_penalty(average);
    score -= repetition_penalty(trimmed);
    if ends_with_terminal(trimmed) {
        score += COMPLETENESS_BONUS;
    }

    score.round().clamp(0.0, 100.0) as u8
}

fn length_penalty(average: f64) -> f64 {
    if average <= LONG_SENTENCE_CHARS {
        return 0.0;
    }
    ((average - LONG_SENTENCE_CHARS) / LONG_SENTENCE_STEP).min(MAX_LENGTH_PENALTY)
}

#[allow(clippy::cast_precision_loss)]
fn repetition_penalty(text: &str) -> f64 {
    let tokens = word_tokens(text);
    if tokens.len() < MIN_TOKENS_FOR_REPETITION {
        return 0.0;
    }
    let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    let ratio = unique.len() as f64 / tokens.len() as f64;
    if ratio >= MIN_UNIQUE_RATIO {
        0.0
    } else {
        (MIN_UNIQUE_RATIO - ratio) * REPETITION_WEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_scores_zero() {
        assert_eq!(calculate_readability_score(""), 0);
        assert_eq!(calculate_readability_score(" \n\t "), 0);
    }

    #[test]
    fn test_clean_text_scores_full() {
        let text = "The service starts today. Support is available by email.";
        assert_eq!(calculate_readability_score(text), 100);
    }

    #[test]
    fn test_incomplete_ending_costs_bonus() {
        let complete = calculate_readability_score("The service starts today.");
        let incomplete = calculate_readability_score("The service starts today and");
        assert_eq!(complete, 100);
        assert_eq!(incomplete, 90);
    }

    #[test]
    fn test_long_sentences_penalized() {
        // one 270-char sentence of distinct words
        let words: Vec<String> = (0..40).map(|i| format!("word{i}")).collect();
        let long = format!("{}.", words.join(" "));
        assert_eq!(calculate_readability_score(&long), 66);
    }

    #[test]
    fn test_repetition_penalized() {
        let repetitive = "안녕하세요. ".repeat(20);
        let varied = "안녕하세요. 오늘 날씨가 좋습니다. 산책을 가볼까요?";
        assert!(calculate_readability_score(&repetitive) < calculate_readability_score(varied));
    }

    #[test]
    fn test_score_never_negative() {
        let text = format!("{}and", "spam ".repeat(400));
        let score = calculate_readability_score(&text);
        assert!(score <= 100);
        assert!(score < 50);
    }

    #[test]
    fn test_length_penalty_capped() {
        assert!((length_penalty(10_000.0) - MAX_LENGTH_PENALTY).abs() < f64::EPSILON);
        assert!(length_penalty(80.0).abs() < f64::EPSILON);
    }
}
