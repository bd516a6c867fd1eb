//! A contiguous slice of the book with lazily computed pages.

use std::ops::Range;
use std::sync::{Arc, Mutex};

use log::trace;

use crate::measure::{Layout, TextMeasurer};

/// One chapter of a [`Book`].
///
/// The chapter's text and absolute range are fixed at segmentation time.
/// Page boundaries are not: they depend on layout parameters and on an
/// expensive external measurement, so they are computed on first access and
/// cached until [`Chapter::invalidate`] runs. Per-page heights (used only by
/// scroll-style presentations) are cached the same way, one element at a
/// time.
///
/// The caches sit behind a `Mutex` so that an `invalidate` cannot interleave
/// with an in-flight `pages` computation; the chapter itself otherwise only
/// needs `&self`.
///
/// [`Book`]: crate::Book
#[derive(Debug)]
pub struct Chapter {
    index: usize,
    title: Option<String>,
    range: Range<usize>,
    content: String,
    cache: Mutex<PageCache>,
}

#[derive(Debug, Default)]
struct PageCache {
    /// Page ranges relative to the chapter start, tiling `0..content.len()`.
    pages: Option<Arc<[Range<usize>]>>,
    /// Per-page heights, parallel to `pages`. `0.0` means not yet measured.
    heights: Vec<f32>,
}

impl Chapter {
    pub(crate) fn new(
        index: usize,
        title: Option<String>,
        range: Range<usize>,
        content: String,
    ) -> Self {
        debug_assert_eq!(range.len(), content.len());
        Self {
            index,
            title,
            range,
            content,
            cache: Mutex::new(PageCache::default()),
        }
    }

    /// Position of this chapter in the book's chapter list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Heading text, if segmentation found one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Absolute byte range of this chapter within the book text.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The chapter's text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Page ranges (relative to the chapter start), measuring on first call.
    ///
    /// A non-empty chapter always has at least one page: if the measurer
    /// returns an empty partition, a single page spanning the whole chapter
    /// is synthesized rather than surfacing an inconsistent zero-page state.
    pub fn pages(&self, measurer: &dyn TextMeasurer, layout: &Layout) -> Arc<[Range<usize>]> {
        let mut cache = self.cache.lock().unwrap();
        if let Some(pages) = &cache.pages {
            return Arc::clone(pages);
        }

        trace!("paginating chapter {} ({} bytes)", self.index, self.content.len());
        let mut ranges = measurer.paginate(&self.content, &layout.style, layout.constraint);
        if ranges.is_empty() && !self.content.is_empty() {
            ranges = vec![0..self.content.len()];
        }
        let pages: Arc<[Range<usize>]> = ranges.into();
        cache.heights = vec![0.0; pages.len()];
        cache.pages = Some(Arc::clone(&pages));
        pages
    }

    /// Number of pages under the current layout.
    pub fn page_count(&self, measurer: &dyn TextMeasurer, layout: &Layout) -> usize {
        self.pages(measurer, layout).len()
    }

    /// Text of page `page_index`, or `None` if the index is out of range.
    pub fn page_text(
        &self,
        page_index: usize,
        measurer: &dyn TextMeasurer,
        layout: &Layout,
    ) -> Option<&str> {
        let range = self.pages(measurer, layout).get(page_index)?.clone();
        Some(&self.content[range])
    }

    /// Measured height of page `page_index`, or `None` if out of range.
    ///
    /// Heights are filled element by element: the first query for a page
    /// calls the measurer, later queries hit the cache.
    pub fn page_height(
        &self,
        page_index: usize,
        measurer: &dyn TextMeasurer,
        layout: &Layout,
    ) -> Option<f32> {
        // Ensure the page partition (and the parallel height array) exists.
        let pages = self.pages(measurer, layout);
        let range = pages.get(page_index)?.clone();

        let mut cache = self.cache.lock().unwrap();
        if cache.heights.len() != pages.len() {
            // An invalidation slipped in between the two lock scopes.
            cache.heights = vec![0.0; pages.len()];
        }
        let cached = cache.heights[page_index];
        if cached > 0.0 {
            return Some(cached);
        }
        let height = measurer.measure_height(
            &self.content[range],
            &layout.style,
            layout.constraint.width,
        );
        cache.heights[page_index] = height;
        Some(height)
    }

    /// Sum of heights of all pages strictly before `page_index`.
    pub fn cumulative_height(
        &self,
        page_index: usize,
        measurer: &dyn TextMeasurer,
        layout: &Layout,
    ) -> f32 {
        let count = self.page_count(measurer, layout).min(page_index);
        (0..count)
            .filter_map(|i| self.page_height(i, measurer, layout))
            .sum()
    }

    /// Total height of the chapter under the current layout.
    pub fn total_height(&self, measurer: &dyn TextMeasurer, layout: &Layout) -> f32 {
        let count = self.page_count(measurer, layout);
        (0..count)
            .filter_map(|i| self.page_height(i, measurer, layout))
            .sum()
    }

    /// Drop cached pages and heights. Title and range are untouched; the
    /// next page query re-measures under whatever layout it is given.
    pub fn invalidate(&self) {
        let mut cache = self.cache.lock().unwrap();
        cache.pages = None;
        cache.heights.clear();
    }
}
