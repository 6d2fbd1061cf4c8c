//! Boundary-preserving splitter.
//!
//! Text is first partitioned into structural units (paragraphs with their
//! headers, Q&A pairs), then each unit's sentences are folded into groups
//! no longer than the configured maximum. A sentence is never cut; one that
//! is longer than the maximum becomes its own oversized chunk. A group with
//! under 20 meaningful characters (a header, a short question line) takes the
//! next sentence even past the maximum, so headers are never emitted alone.
//! Consecutive chunks of the same unit share an overlap prefix made of whole
//! trailing sentences of the previous chunk.

use super::config::ResolvedConfig;
use crate::analysis::sentence::segment_sentences;
use crate::analysis::structure::{
    is_answer_line, is_header_underline, is_question_line, mark_header_lines,
};
use crate::io::unicode::{OffsetMap, is_blank, lines_with_offsets};
use crate::scoring::quality::{MIN_MEANINGFUL_CHARS, meaningful_chars};
use std::ops::Range;
use tracing::trace;

/// A chunk candidate before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'a> {
    /// Overlap prefix followed by the primary content.
    pub content: &'a str,
    /// Character offset of the primary content in the original text.
    pub start_offset: usize,
    /// Character offset one past the primary content.
    pub end_offset: usize,
    /// Whether `content` opens with text repeated from the previous chunk.
    pub has_overlap: bool,
}

/// What a structural unit holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Plain paragraph, with any headers in front of it.
    Paragraph,
    /// A question and its answer.
    QaPair,
    /// The whole text, when structure is not preserved.
    Document,
}

/// A contiguous region of the text that chunks never straddle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Byte range in the original text.
    pub range: Range<usize>,
    /// Kind of content.
    pub kind: UnitKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Headings,
    Question,
    Answer,
    QaPair,
    Text,
}

/// A run of non-blank lines, cut before every question label.
#[derive(Debug, Clone)]
struct Block {
    range: Range<usize>,
    kind: BlockKind,
    tiny: bool,
}

impl Block {
    fn classify(text: &str, range: Range<usize>) -> Self {
        let slice = &text[range.clone()];
        let mut headings_only = true;
        let mut question = false;
        let mut answer = false;
        for (line, marked) in mark_header_lines(slice) {
            headings_only &= marked;
            question |= is_question_line(line);
            answer |= is_answer_line(line);
        }

        let kind = match (headings_only, question, answer) {
            (true, _, _) => BlockKind::Headings,
            (false, true, true) => BlockKind::QaPair,
            (false, true, false) => BlockKind::Question,
            (false, false, true) => BlockKind::Answer,
            (false, false, false) => BlockKind::Text,
        };

        Self {
            tiny: kind == BlockKind::Text && meaningful_chars(slice) < MIN_MEANINGFUL_CHARS,
            range,
            kind,
        }
    }
}

fn blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Range<usize>> = None;

    for (start, line) in lines_with_offsets(text) {
        if is_blank(line) {
            blocks.extend(current.take().map(|r| Block::classify(text, r)));
            continue;
        }
        let end = start + line.len();
        match current.as_mut() {
            Some(range) if !is_question_line(line) => range.end = end,
            _ => {
                blocks.extend(current.take().map(|r| Block::classify(text, r)));
                current = Some(start..end);
            }
        }
    }
    blocks.extend(current.map(|r| Block::classify(text, r)));

    blocks
}

/// Partitions `text` into structural units.
///
/// Header-only blocks and paragraphs with under 20 meaningful characters
/// are attached to the unit that follows them; trailing short paragraphs
/// join the unit before them. A question paragraph directly followed by an
/// answer paragraph forms a single Q&A unit.
///
/// # Examples
///
/// ```
/// use smartchunk::chunking::splitter::{UnitKind, structural_units};
///
/// let text = "# 안내\n\n회원 가입은 홈페이지에서 이메일로 할 수 있습니다.\n\nQ: 무료인가요?\nA: 네, 무료입니다.";
/// let units = structural_units(text);
/// assert_eq!(units.len(), 2);
/// assert_eq!(units[0].kind, UnitKind::Paragraph);
/// assert!(text[units[0].range.clone()].starts_with("# 안내"));
/// assert_eq!(units[1].kind, UnitKind::QaPair);
/// ```
#[must_use]
pub fn structural_units(text: &str) -> Vec<Unit> {
    let blocks = blocks(text);
    let mut units: Vec<Unit> = Vec::new();
    let mut carry: Option<usize> = None;
    let mut carry_has_text = false;

    let mut iter = blocks.iter().peekable();
    while let Some(block) = iter.next() {
        let (end, kind) = match block.kind {
            BlockKind::Headings => {
                carry.get_or_insert(block.range.start);
                continue;
            }
            BlockKind::Text if block.tiny => {
                carry.get_or_insert(block.range.start);
                carry_has_text = true;
                continue;
            }
            BlockKind::Question => match iter.next_if(|next| next.kind == BlockKind::Answer) {
                Some(answer) => (answer.range.end, UnitKind::QaPair),
                None => (block.range.end, UnitKind::Paragraph),
            },
            BlockKind::QaPair => (block.range.end, UnitKind::QaPair),
            BlockKind::Answer | BlockKind::Text => (block.range.end, UnitKind::Paragraph),
        };
        units.push(Unit {
            range: carry.take().unwrap_or(block.range.start)..end,
            kind,
        });
        carry_has_text = false;
    }

    if let Some(start) = carry {
        let end = blocks.last().map_or(start, |b| b.range.end);
        match units.last_mut() {
            Some(last) if carry_has_text => last.range.end = end,
            _ => units.push(Unit {
                range: start..end,
                kind: UnitKind::Paragraph,
            }),
        }
    }

    units
}

/// Splits `text` into raw chunks under `config`.
///
/// The overlap prefix holds only whole sentences, so when the previous
/// chunk's last sentence is longer than `config.overlap` the next chunk gets
/// no prefix at all. With the default 500/50, English text whose sentences
/// run past 50 characters is chunked without overlap.
///
/// # Examples
///
/// ```
/// use smartchunk::chunking::{ResolvedConfig, split};
///
/// let text = "첫 번째 문장입니다. 두 번째 문장입니다.";
/// let chunks = split(text, &ResolvedConfig::default());
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].content, text);
/// assert_eq!(chunks[0].end_offset, text.chars().count());
/// ```
#[must_use]
pub fn split<'a>(text: &'a str, config: &ResolvedConfig) -> Vec<RawChunk<'a>> {
    let units = if config.preserve_structure {
        structural_units(text)
    } else {
        vec![Unit {
            range: 0..text.len(),
            kind: UnitKind::Document,
        }]
    };

    let offsets = OffsetMap::new(text);
    let mut chunks = Vec::new();
    for unit in &units {
        let before = chunks.len();
        split_unit(text, unit, config, &offsets, &mut chunks);
        trace!(
            kind = ?unit.kind,
            start = offsets.char_offset(unit.range.start),
            end = offsets.char_offset(unit.range.end),
            chunks = chunks.len() - before,
            "split unit"
        );
    }
    chunks
}

fn split_unit<'a>(
    text: &'a str,
    unit: &Unit,
    config: &ResolvedConfig,
    offsets: &OffsetMap,
    out: &mut Vec<RawChunk<'a>>,
) {
    let base = unit.range.start;
    let mut spans: Vec<Range<usize>> = Vec::new();
    for sentence in segment_sentences(&text[unit.range.clone()]) {
        if sentence.is_blank() {
            continue;
        }
        let span = base + sentence.body_start()..base + sentence.body_end();
        if is_header_underline(&text[span.clone()]) {
            push_underline(text, &mut spans, span);
        } else {
            spans.push(span);
        }
    }

    let mut previous: Option<&[Range<usize>]> = None;
    for group in group_sentences(text, &spans, config.max_chunk_size, offsets) {
        let sentences = &spans[group];
        let (Some(first), Some(last)) = (sentences.first(), sentences.last()) else {
            continue;
        };
        let prefix = previous
            .and_then(|prev| overlap_start(prev, first.start, config.overlap, offsets));

        out.push(RawChunk {
            content: &text[prefix.unwrap_or(first.start)..last.end],
            start_offset: offsets.char_offset(first.start),
            end_offset: offsets.char_offset(last.end),
            has_overlap: prefix.is_some(),
        });
        previous = Some(sentences);
    }
}

/// Appends a setext underline, merged with every span that covers the title
/// line above it so the pair never straddles a chunk boundary.
fn push_underline(text: &str, spans: &mut Vec<Range<usize>>, underline: Range<usize>) {
    let line_start = text[..underline.start].rfind('\n').map_or(0, |i| i + 1);
    if line_start == 0 {
        spans.push(underline);
        return;
    }
    let title_start = text[..line_start - 1].rfind('\n').map_or(0, |i| i + 1);

    let mut start = underline.start;
    while let Some(last) = spans.pop_if(|last| last.end > title_start) {
        start = start.min(last.start);
    }
    spans.push(start..underline.end);
}

/// Folds sentence spans into index ranges whose text, from the first
/// sentence's start to the last one's end, fits in `max_chars`. A group
/// below [`MIN_MEANINGFUL_CHARS`] always takes the next sentence.
fn group_sentences(
    text: &str,
    spans: &[Range<usize>],
    max_chars: usize,
    offsets: &OffsetMap,
) -> Vec<Range<usize>> {
    spans
        .iter()
        .enumerate()
        .fold(Vec::new(), |mut groups: Vec<Range<usize>>, (i, span)| {
            let fits = groups.last().is_some_and(|group| {
                let group_start = spans[group.start].start;
                offsets.char_offset(span.end) - offsets.char_offset(group_start) <= max_chars
                    || meaningful_chars(&text[group_start..spans[group.end - 1].end])
                        < MIN_MEANINGFUL_CHARS
            });
            match groups.last_mut() {
                Some(group) if fits => group.end = i + 1,
                _ => groups.push(i..i + 1),
            }
            groups
        })
}

/// Start of the longest run of whole trailing sentences of `previous` that
/// fits, together with the gap before `primary_start`, in `overlap` chars.
fn overlap_start(
    previous: &[Range<usize>],
    primary_start: usize,
    overlap: usize,
    offsets: &OffsetMap,
) -> Option<usize> {
    let target = offsets.char_offset(primary_start);
    previous
        .iter()
        .rev()
        .map(|s| s.start)
        .take_while(|&start| target - offsets.char_offset(start) <= overlap)
        .last()
}
