//! Chapter segmentation.
//!
//! Splits an untagged text blob into an ordered list of chapters by scanning
//! for Chinese-style headings ("第一章", "第十三节", ...). The pattern is a
//! heuristic, so the walk tolerates noise: a short run of text before the
//! first heading is folded into the first chapter, a long one becomes a
//! titled preface, and headings packed closely together (usually a table of
//! contents) are merged into a single boundary instead of producing a flood
//! of tiny chapters.
//!
//! When the text has no headings at all, or so few that individual chapters
//! would be enormous, segmentation falls back to fixed-size chunks so that
//! per-chapter pagination stays affordable.
//!
//! Whatever path is taken, the returned ranges exactly tile the input:
//! sorted, non-overlapping, no gaps. Segmentation never fails; empty input
//! yields an empty chapter list.

use std::ops::Range;
use std::sync::LazyLock;

use log::debug;
use regex::{Regex, RegexBuilder};

/// A chapter boundary produced by segmentation: an absolute byte range into
/// the source text plus the heading text, when one was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub range: Range<usize>,
    pub title: Option<String>,
}

/// Leading text longer than this (in chars) becomes its own preface chapter;
/// anything shorter is folded into the first real chapter.
pub const PREFACE_GAP_CHARS: usize = 100;

/// A heading starting within this many chars of the previous boundary is
/// treated as table-of-contents noise and merged instead of closing a
/// chapter.
pub const MERGE_WINDOW_CHARS: usize = 50;

/// If the average run between headings exceeds this many chars, match-based
/// segmentation is abandoned in favor of fixed-size chunking.
pub const MAX_AVG_CHAPTER_CHARS: usize = 20_000;

/// Chunk size (in chars) for the no-headings fallback. Only the final chunk
/// may be shorter.
pub const CHUNK_CHARS: usize = 10_000;

/// Title given to a synthesized preface chapter.
pub const PREFACE_TITLE: &str = "序言";

/// Heading shape: optional whitespace, then `第`, one to eight characters,
/// then a chapter-marker character. Lazy on the middle so the title stops at
/// the first marker.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\s*第.{1,8}?[章节集回卷部篇]")
        .case_insensitive(true)
        .build()
        .expect("heading pattern is valid")
});

/// Segment `text` into chapters.
///
/// The output ranges are sorted and tile `0..text.len()` exactly. Empty
/// input produces an empty list; any other input produces at least one
/// segment.
pub fn segment(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }

    let matches: Vec<Range<usize>> = HEADING.find_iter(text).map(|m| m.range()).collect();
    let total_chars = text.chars().count();

    if matches.is_empty() || total_chars / matches.len() > MAX_AVG_CHAPTER_CHARS {
        debug!(
            "falling back to fixed chunks: {} matches over {} chars",
            matches.len(),
            total_chars
        );
        return chunk(text);
    }
    debug!("segmenting on {} heading matches", matches.len());

    let segments = walk_matches(text, &matches);
    debug_assert!(tiles(&segments, text.len()), "segments must tile the text");
    segments
}

/// Walk heading matches left to right, maintaining a running boundary.
fn walk_matches(text: &str, matches: &[Range<usize>]) -> Vec<Segment> {
    let mut segments = Vec::new();
    // Start and end of the boundary region opened by the last accepted
    // heading (possibly grown by merges), plus that heading's text.
    let mut boundary = 0..0;
    let mut title: Option<String> = None;

    for (idx, m) in matches.iter().enumerate() {
        if idx == 0 {
            if char_distance(text, 0, m.start) > PREFACE_GAP_CHARS {
                segments.push(Segment {
                    range: 0..m.start,
                    title: Some(PREFACE_TITLE.to_string()),
                });
                boundary = m.clone();
            } else {
                // Short front matter (a stub prologue, a contents line) rides
                // along with the first chapter.
                boundary = 0..m.end;
            }
            title = Some(heading_text(text, m));
        } else if char_distance(text, boundary.end, m.start) < MERGE_WINDOW_CHARS {
            boundary.end = m.end;
            title = Some(heading_text(text, m));
        } else {
            segments.push(Segment {
                range: boundary.start..m.start,
                title: title.take(),
            });
            boundary = m.clone();
            title = Some(heading_text(text, m));
        }
    }

    segments.push(Segment {
        range: boundary.start..text.len(),
        title,
    });
    segments
}

/// Fallback: split into untitled chunks of at most [`CHUNK_CHARS`] chars.
fn chunk(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (pos, _) in text.char_indices() {
        if count == CHUNK_CHARS {
            segments.push(Segment {
                range: start..pos,
                title: None,
            });
            start = pos;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        segments.push(Segment {
            range: start..text.len(),
            title: None,
        });
    }
    segments
}

fn heading_text(text: &str, m: &Range<usize>) -> String {
    text[m.clone()].trim().to_string()
}

/// Number of chars between two byte offsets.
fn char_distance(text: &str, from: usize, to: usize) -> usize {
    text[from..to].chars().count()
}

fn tiles(segments: &[Segment], len: usize) -> bool {
    let mut cursor = 0;
    for seg in segments {
        if seg.range.start != cursor || seg.range.end <= seg.range.start {
            return false;
        }
        cursor = seg.range.end;
    }
    cursor == len
}
