//! Text measurement boundary.
//!
//! Fitting text into a bounded area requires font metrics and line breaking,
//! which live in the presentation layer. The core only needs the resulting
//! partition, so measurement is injected as a [`TextMeasurer`] and treated as
//! an expensive pure oracle: same inputs, same output. [`Chapter`] calls it
//! lazily and caches the result.
//!
//! [`GridMeasurer`] is a deterministic monospace implementation, good enough
//! for tests, benchmarks, and terminal-style consumers.
//!
//! [`Chapter`]: crate::Chapter

use std::ops::Range;

/// Style attributes passed through to the measurer.
///
/// The core never interprets these; they only participate in measurement and
/// in deciding when cached pages must be invalidated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Nominal glyph size in points.
    pub font_size: f32,
    /// Line height as a multiple of `font_size`.
    pub line_spacing: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_spacing: 1.4,
        }
    }
}

/// A bounding size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The layout parameters pagination depends on.
///
/// Changing either field changes every page boundary in the book, which is
/// why [`BookIndex::set_layout`] invalidates all cached pages.
///
/// [`BookIndex::set_layout`]: crate::BookIndex::set_layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub style: TextStyle,
    pub constraint: Size,
}

impl Layout {
    pub fn new(style: TextStyle, constraint: Size) -> Self {
        Self { style, constraint }
    }
}

/// External pagination oracle.
///
/// Implementations must be pure functions of their inputs; the caching in
/// [`Chapter`] is only correct under that assumption.
///
/// [`Chapter`]: crate::Chapter
pub trait TextMeasurer {
    /// Partition `text` into page ranges fitting `constraint`.
    ///
    /// The returned ranges are byte ranges into `text`. They must be sorted,
    /// non-overlapping, lie on `char` boundaries, and union to exactly
    /// `0..text.len()`.
    fn paginate(&self, text: &str, style: &TextStyle, constraint: Size) -> Vec<Range<usize>>;

    /// Height in points of `text` laid out at `width`.
    ///
    /// Only consulted by scroll-style presentations via
    /// [`Chapter::page_height`]; paged presentations never call it.
    ///
    /// [`Chapter::page_height`]: crate::Chapter::page_height
    fn measure_height(&self, text: &str, style: &TextStyle, width: f32) -> f32;
}

/// Monospace grid measurer.
///
/// Every character occupies a `font_size`-wide cell and every line is
/// `font_size * line_spacing` tall. Newlines force a line break; lines longer
/// than the grid width wrap. Deterministic and cheap, which makes it the
/// reference oracle for the test suite.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridMeasurer;

impl GridMeasurer {
    fn grid(style: &TextStyle, constraint: Size) -> (usize, usize) {
        let cols = (constraint.width / style.font_size).floor() as usize;
        let rows = (constraint.height / (style.font_size * style.line_spacing)).floor() as usize;
        (cols.max(1), rows.max(1))
    }

    /// Number of grid lines `text` occupies when wrapped at `cols` columns.
    fn line_count(text: &str, cols: usize) -> usize {
        let mut lines = 0;
        for raw in text.split('\n') {
            let chars = raw.chars().count();
            lines += 1 + chars.saturating_sub(1) / cols;
        }
        lines.max(1)
    }
}

impl TextMeasurer for GridMeasurer {
    fn paginate(&self, text: &str, style: &TextStyle, constraint: Size) -> Vec<Range<usize>> {
        if text.is_empty() {
            return Vec::new();
        }
        let (cols, rows) = Self::grid(style, constraint);

        let mut pages = Vec::new();
        let mut page_start = 0;
        let mut line_col = 0;
        let mut page_lines = 0;
        for (pos, ch) in text.char_indices() {
            if line_col == cols || ch == '\n' {
                line_col = 0;
                page_lines += 1;
                if page_lines == rows {
                    // `ch == '\n'` ends a line; the newline itself still
                    // belongs to the finished page.
                    let end = if ch == '\n' { pos + ch.len_utf8() } else { pos };
                    if end > page_start {
                        pages.push(page_start..end);
                        page_start = end;
                    }
                    page_lines = 0;
                    if ch == '\n' {
                        continue;
                    }
                }
                if ch == '\n' {
                    continue;
                }
            }
            line_col += 1;
        }
        if page_start < text.len() {
            pages.push(page_start..text.len());
        }
        pages
    }

    fn measure_height(&self, text: &str, style: &TextStyle, width: f32) -> f32 {
        let cols = ((width / style.font_size).floor() as usize).max(1);
        Self::line_count(text, cols) as f32 * style.font_size * style.line_spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(cols: usize, rows: usize) -> (TextStyle, Size) {
        let style = TextStyle {
            font_size: 10.0,
            line_spacing: 1.0,
        };
        (style, Size::new(cols as f32 * 10.0, rows as f32 * 10.0))
    }

    fn assert_tiles(pages: &[Range<usize>], len: usize) {
        let mut cursor = 0;
        for page in pages {
            assert_eq!(page.start, cursor, "gap or overlap at {:?}", page);
            assert!(page.end > page.start, "empty page {:?}", page);
            cursor = page.end;
        }
        assert_eq!(cursor, len, "pages do not cover the text");
    }

    #[test]
    fn test_paginate_empty_text() {
        let (style, size) = layout(10, 5);
        assert!(GridMeasurer.paginate("", &style, size).is_empty());
    }

    #[test]
    fn test_paginate_exact_grid() {
        // 4 cols x 2 rows = 8 chars per page.
        let (style, size) = layout(4, 2);
        let text = "abcdefghijkl";
        let pages = GridMeasurer.paginate(text, &style, size);
        assert_eq!(pages, vec![0..8, 8..12]);
        assert_tiles(&pages, text.len());
    }

    #[test]
    fn test_paginate_short_text_single_page() {
        let (style, size) = layout(40, 20);
        let pages = GridMeasurer.paginate("hello", &style, size);
        assert_eq!(pages, vec![0..5]);
    }

    #[test]
    fn test_paginate_newlines_consume_lines() {
        // 10 cols x 2 rows; each line below fits in one row, so every two
        // lines fill a page.
        let (style, size) = layout(10, 2);
        let text = "aa\nbb\ncc\ndd";
        let pages = GridMeasurer.paginate(text, &style, size);
        assert_tiles(&pages, text.len());
        assert_eq!(pages.len(), 2);
        assert_eq!(&text[pages[0].clone()], "aa\nbb\n");
    }

    #[test]
    fn test_paginate_multibyte_boundaries() {
        let (style, size) = layout(3, 1);
        let text = "第一章天地玄黄";
        let pages = GridMeasurer.paginate(text, &style, size);
        assert_tiles(&pages, text.len());
        for page in &pages {
            assert!(text.is_char_boundary(page.start));
            assert!(text.is_char_boundary(page.end));
        }
        assert_eq!(&text[pages[0].clone()], "第一章");
    }

    #[test]
    fn test_paginate_is_pure() {
        let (style, size) = layout(7, 3);
        let text = "some text\nacross a few\nlines that wraps";
        assert_eq!(
            GridMeasurer.paginate(text, &style, size),
            GridMeasurer.paginate(text, &style, size)
        );
    }

    #[test]
    fn test_measure_height_counts_wrapped_lines() {
        let style = TextStyle {
            font_size: 10.0,
            line_spacing: 1.5,
        };
        // 5 cols: "abcdefg" wraps to 2 lines, plus "hi" on its own line.
        let height = GridMeasurer.measure_height("abcdefg\nhi", &style, 50.0);
        assert_eq!(height, 3.0 * 15.0);
    }
}
