//! Structural pattern detection.
//!
//! Line-level scanners for markdown headers, separators, Q&A labels, table
//! rows and list items, plus the document-wide [`analyze_structure`] pass.
//! Scanners are plain character predicates over a single line, except
//! [`mark_header_lines`], which needs the next line to spot setext headers.

use crate::core::DocumentStructure;
use crate::io::unicode::lines_with_offsets;

/// Labels that open a question line.
pub const QUESTION_MARKERS: [&str; 2] = ["Q:", "질문:"];

/// Labels that open an answer line.
pub const ANSWER_MARKERS: [&str; 2] = ["A:", "답변:"];

/// `# Title` through `###### Title`.
#[must_use]
pub fn is_markdown_header(line: &str) -> bool {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes)
        && trimmed[hashes..]
            .chars()
            .next()
            .is_some_and(|c| c == ' ' || c == '\t')
}

/// A run of 3+ identical `-`, `*`, `_` or `=` characters, spaces allowed
/// between them (`***`, `- - -`, `=====`).
#[must_use]
pub fn is_separator_line(line: &str) -> bool {
    let mut marks = line.chars().filter(|c| !c.is_whitespace());
    let Some(first) = marks.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_' | '=') && {
        let rest: Vec<char> = marks.collect();
        rest.len() >= 2 && rest.iter().all(|&c| c == first)
    }
}

/// The `===` / `---` line under a setext-style header.
#[must_use]
pub fn is_header_underline(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() >= 3
        && (trimmed.chars().all(|c| c == '=') || trimmed.chars().all(|c| c == '-'))
}

/// Lines of `text` with a flag set on every header or separator line.
///
/// Headers are ATX (`## Title`) or setext, where a non-blank line is
/// followed by its `===` / `---` underline. The underline itself is a
/// separator.
///
/// # Examples
///
/// ```
/// use smartchunk::analysis::structure::mark_header_lines;
///
/// let marks: Vec<bool> = mark_header_lines("Guide\n=====\nBody text")
///     .into_iter()
///     .map(|(_, marked)| marked)
///     .collect();
/// assert_eq!(marks, vec![true, true, false]);
/// ```
#[must_use]
pub fn mark_header_lines(text: &str) -> Vec<(&str, bool)> {
    let lines: Vec<&str> = lines_with_offsets(text).map(|(_, line)| line).collect();
    lines
        .iter()
        .enumerate()
        .map(|(i, &line)| {
            let titled = !line.trim().is_empty()
                && lines.get(i + 1).is_some_and(|next| is_header_underline(next));
            let marked = titled || is_markdown_header(line) || is_separator_line(line);
            (line, marked)
        })
        .collect()
}

/// Line opens with a question label.
#[must_use]
pub fn is_question_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    QUESTION_MARKERS.iter().any(|m| trimmed.starts_with(m))
}

/// Line opens with an answer label.
#[must_use]
pub fn is_answer_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    ANSWER_MARKERS.iter().any(|m| trimmed.starts_with(m))
}

/// Line holds at least two pipes (`| a | b |`).
#[must_use]
pub fn is_table_row(line: &str) -> bool {
    line.chars().filter(|&c| c == '|').count() >= 2
}

/// `- item`, `* item`, `+ item` or `12. item`.
#[must_use]
pub fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some('-' | '*' | '+') => chars.next().is_some_and(|c| c == ' ' || c == '\t'),
        Some(c) if c.is_ascii_digit() => {
            let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
            let mut rest = trimmed[digits..].chars();
            rest.next() == Some('.') && rest.next().is_some_and(|c| c == ' ' || c == '\t')
        }
        _ => false,
    }
}

/// Line opens any structural element the segmenter should not glue onto
/// the previous line.
#[must_use]
pub fn opens_structural_line(line: &str) -> bool {
    is_markdown_header(line)
        || is_question_line(line)
        || is_answer_line(line)
        || is_list_item(line)
        || is_table_row(line)
        || is_separator_line(line)
}

/// Scans `text` for headers, Q&A labels, tables and lists.
///
/// # Examples
///
/// ```
/// use smartchunk::analysis::analyze_structure;
///
/// let s = analyze_structure("# Guide\n\n- step one\n- step two");
/// assert!(s.has_headers && s.has_lists);
/// assert!(!s.has_qa_pairs && !s.has_tables);
/// ```
#[must_use]
pub fn analyze_structure(text: &str) -> DocumentStructure {
    let mut structure = DocumentStructure::default();
    let mut previous: Option<&str> = None;

    for (_, line) in lines_with_offsets(text) {
        let underlined =
            previous.is_some_and(|p| !p.trim().is_empty()) && is_header_underline(line);
        structure.has_headers |= is_markdown_header(line) || underlined;
        structure.has_qa_pairs |= is_question_line(line) || is_answer_line(line);
        structure.has_tables |= is_table_row(line);
        structure.has_lists |= is_list_item(line);
        previous = Some(line);
    }

    structure
}

/// Counts question lines that are followed by an answer line before the
/// next question.
#[must_use]
pub fn count_qa_pairs(text: &str) -> usize {
    let mut pending_question = false;
    let mut pairs = 0;
    for (_, line) in lines_with_offsets(text) {
        if is_question_line(line) {
            pending_question = true;
        } else if is_answer_line(line) && pending_question {
            pairs += 1;
            pending_question = false;
        }
    }
    pairs
}

/// Whether `text` contains both a question and an answer label.
#[must_use]
pub fn has_complete_qa(text: &str) -> bool {
    count_qa_pairs(text) > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("# Title", true ; "h1")]
    #[test_case("###### Deep", true ; "h6")]
    #[test_case("####### Too deep", false ; "h7")]
    #[test_case("#hashtag", false ; "no space")]
    #[test_case("  ## Indented", true ; "indented")]
    #[test_case("Text # not header", false ; "inline hash")]
    fn test_is_markdown_header(line: &str, expected: bool) {
        assert_eq!(is_markdown_header(line), expected);
    }

    #[test_case("---", true ; "dashes")]
    #[test_case("* * *", true ; "spaced stars")]
    #[test_case("___", true ; "underscores")]
    #[test_case("=====", true ; "equals")]
    #[test_case("--", false ; "too short")]
    #[test_case("-=-", false ; "mixed marks")]
    #[test_case("- item", false ; "list item")]
    #[test_case("", false ; "empty")]
    fn test_is_separator_line(line: &str, expected: bool) {
        assert_eq!(is_separator_line(line), expected);
    }

    #[test_case("- item", true ; "dash bullet")]
    #[test_case("* item", true ; "star bullet")]
    #[test_case("+ item", true ; "plus bullet")]
    #[test_case("12. item", true ; "numbered")]
    #[test_case("3.14 is pi", false ; "decimal")]
    #[test_case("---", false ; "separator")]
    #[test_case("-item", false ; "no space")]
    fn test_is_list_item(line: &str, expected: bool) {
        assert_eq!(is_list_item(line), expected);
    }

    #[test]
    fn test_qa_markers() {
        assert!(is_question_line("Q: 무엇인가요?"));
        assert!(is_question_line("질문: 무엇인가요?"));
        assert!(is_answer_line("A: 이것입니다."));
        assert!(is_answer_line("  답변: 이것입니다."));
        assert!(!is_question_line("q: lowercase is not a label"));
        assert!(!is_answer_line("Answer: not a label"));
    }

    #[test]
    fn test_underline_header() {
        let s = analyze_structure("Title\n=====\n\nBody text.");
        assert!(s.has_headers);

        let s = analyze_structure("Body text.\n\n---\n\nMore text.");
        assert!(!s.has_headers);
    }

    #[test]
    fn test_mark_header_lines() {
        let text = "Installation Guide\n=====\n\nGetting Started\n---\n## Setup\nRun the installer.\n***";
        let marked: Vec<&str> = mark_header_lines(text)
            .into_iter()
            .filter_map(|(line, marked)| marked.then_some(line))
            .collect();
        assert_eq!(
            marked,
            vec!["Installation Guide", "=====", "Getting Started", "---", "## Setup", "***"]
        );
    }

    #[test]
    fn test_blank_line_above_underline_is_not_a_title() {
        let marks: Vec<bool> = mark_header_lines("Body text.\n\n---")
            .into_iter()
            .map(|(_, marked)| marked)
            .collect();
        assert_eq!(marks, vec![false, false, true]);
    }

    #[test]
    fn test_table_detection() {
        let s = analyze_structure("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(s.has_tables);
        assert!(!analyze_structure("a | b").has_tables);
    }

    #[test]
    fn test_flags_are_independent() {
        let text = "# FAQ\n\nQ: 질문?\nA: 답변.\n\n- item\n\n| x | y |";
        let s = analyze_structure(text);
        assert!(s.has_headers);
        assert!(s.has_qa_pairs);
        assert!(s.has_lists);
        assert!(s.has_tables);
    }

    #[test]
    fn test_plain_text_has_no_structure() {
        assert_eq!(
            analyze_structure("Just a plain sentence. And another."),
            DocumentStructure::default()
        );
    }

    #[test]
    fn test_count_qa_pairs() {
        let text = "Q: one?\nA: yes.\nQ: two?\nA: no.\nQ: dangling?";
        assert_eq!(count_qa_pairs(text), 2);
        assert_eq!(count_qa_pairs("A: answer first\nQ: then question"), 0);
        assert!(has_complete_qa("질문: 뭔가요?\n답변: 이거요."));
        assert!(!has_complete_qa("Q: only a question"));
    }
}
