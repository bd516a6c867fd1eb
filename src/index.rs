//! The queryable chapter/page structure of a book.
//!
//! [`BookIndex`] owns the book text, its segmented chapters, and the layout
//! parameters pagination depends on. Everything it answers is derived: a
//! [`Page`] is rebuilt from the chapter caches on every request, and a
//! [`Coordinate`] is just a pair of indices. All lookups are total; an
//! out-of-range coordinate or offset yields `None`, never a panic.

use std::fmt;

use log::debug;

use crate::book::Book;
use crate::chapter::Chapter;
use crate::location::PersistedLocation;
use crate::measure::{Layout, TextMeasurer};
use crate::segment;
use crate::util::search_partition;

/// A logical reading position: which chapter, which page within it.
///
/// Ordering follows reading order, chapter first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub chapter: usize,
    pub page: usize,
}

impl Coordinate {
    pub fn new(chapter: usize, page: usize) -> Self {
        Self { chapter, page }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.chapter, self.page)
    }
}

/// A displayable page, materialized on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub chapter_index: usize,
    pub page_index: usize,
    pub content: String,
    /// How far into the book this page starts, in `[0, 1]`.
    pub progress: f64,
    /// Book display title, when one was set.
    pub header: Option<String>,
}

/// Owns the book and its chapters; answers coordinate, offset, and progress
/// queries for the presentation layer.
///
/// Segmentation runs once, eagerly, in [`BookIndex::new`]. Pagination runs
/// lazily per chapter on first access and is dropped wholesale by
/// [`invalidate_all`] (or [`set_layout`]) when layout parameters change.
///
/// [`invalidate_all`]: BookIndex::invalidate_all
/// [`set_layout`]: BookIndex::set_layout
pub struct BookIndex {
    book: Book,
    chapters: Vec<Chapter>,
    measurer: Box<dyn TextMeasurer>,
    layout: Layout,
}

impl BookIndex {
    /// Segment `book` into chapters and build the index.
    ///
    /// An empty book yields zero chapters; every query then returns
    /// `None`/`0`.
    pub fn new(book: Book, measurer: Box<dyn TextMeasurer>, layout: Layout) -> Self {
        let chapters = segment::segment(book.as_str())
            .into_iter()
            .enumerate()
            .map(|(index, seg)| {
                let content = book.as_str()[seg.range.clone()].to_string();
                Chapter::new(index, seg.title, seg.range, content)
            })
            .collect::<Vec<_>>();
        debug!("indexed book: {} bytes, {} chapters", book.len(), chapters.len());
        Self {
            book,
            chapters,
            measurer,
            layout,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter(&self, chapter_index: usize) -> Option<&Chapter> {
        self.chapters.get(chapter_index)
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    /// The page at `(chapter_index, page_index)`, or `None` if either index
    /// is out of range. Asking for the page after the last one is a normal
    /// way to discover there isn't one.
    pub fn page_at(&self, chapter_index: usize, page_index: usize) -> Option<Page> {
        let chapter = self.chapters.get(chapter_index)?;
        let content = chapter
            .page_text(page_index, self.measurer.as_ref(), &self.layout)?
            .to_string();
        Some(Page {
            chapter_index,
            page_index,
            content,
            progress: self.progress(chapter_index, page_index),
            header: self.book.title().map(str::to_string),
        })
    }

    /// The page containing the given coordinate, if it is still valid.
    pub fn page(&self, coord: Coordinate) -> Option<Page> {
        self.page_at(coord.chapter, coord.page)
    }

    /// Absolute byte offset of the page's first character in the book.
    pub fn global_offset(&self, chapter_index: usize, page_index: usize) -> Option<usize> {
        let chapter = self.chapters.get(chapter_index)?;
        let page = chapter
            .pages(self.measurer.as_ref(), &self.layout)
            .get(page_index)?
            .clone();
        Some(chapter.range().start + page.start)
    }

    /// Offset of the page's first character relative to its chapter start.
    pub fn chapter_sublocation(&self, chapter_index: usize, page_index: usize) -> Option<usize> {
        let chapter = self.chapters.get(chapter_index)?;
        let page = chapter
            .pages(self.measurer.as_ref(), &self.layout)
            .get(page_index)?
            .clone();
        Some(page.start)
    }

    /// Reading progress of the page in `[0, 1]`.
    ///
    /// The last page of the last chapter reports exactly `1.0`; offset
    /// division alone would land just short of it. A failed lookup reports
    /// `0.0`.
    pub fn progress(&self, chapter_index: usize, page_index: usize) -> f64 {
        // Check the chapter index before asking for a page count: paginating
        // the last chapter here would defeat per-chapter laziness for every
        // query made from any other chapter.
        if chapter_index + 1 == self.chapters.len() {
            let last = &self.chapters[chapter_index];
            if page_index + 1 == last.page_count(self.measurer.as_ref(), &self.layout) {
                return 1.0;
            }
        }
        match self.global_offset(chapter_index, page_index) {
            Some(offset) => (offset as f64 / self.book.len() as f64).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    /// Index of the page containing `sublocation` (a chapter-local byte
    /// offset). Used to re-find the same text position after pages have been
    /// re-measured under a new layout.
    pub fn page_index_in_chapter(
        &self,
        chapter_index: usize,
        sublocation: usize,
    ) -> Option<usize> {
        let chapter = self.chapters.get(chapter_index)?;
        let pages = chapter.pages(self.measurer.as_ref(), &self.layout);
        search_partition(pages.len(), chapter.range().len(), sublocation, |i| {
            pages[i].clone()
        })
    }

    /// Find the coordinate of the page containing the absolute `offset`.
    ///
    /// Two nested binary searches: chapters first, then pages within the
    /// found chapter. `None` only when `offset` is outside the book.
    pub fn locate(&self, offset: usize) -> Option<Coordinate> {
        let chapter_index = search_partition(self.chapters.len(), self.book.len(), offset, |i| {
            self.chapters[i].range()
        })?;
        let chapter = &self.chapters[chapter_index];
        let sublocation = offset - chapter.range().start;
        let pages = chapter.pages(self.measurer.as_ref(), &self.layout);
        let page = search_partition(pages.len(), chapter.range().len(), sublocation, |i| {
            pages[i].clone()
        })?;
        Some(Coordinate::new(chapter_index, page))
    }

    /// The page containing the absolute `offset`.
    pub fn page_at_offset(&self, offset: usize) -> Option<Page> {
        let coord = self.locate(offset)?;
        self.page(coord)
    }

    /// The coordinate after `coord` in reading order, crossing into the next
    /// chapter when needed.
    pub fn next_coordinate(&self, coord: Coordinate) -> Option<Coordinate> {
        let chapter = self.chapters.get(coord.chapter)?;
        if coord.page + 1 < chapter.page_count(self.measurer.as_ref(), &self.layout) {
            return Some(Coordinate::new(coord.chapter, coord.page + 1));
        }
        if coord.chapter + 1 < self.chapters.len() {
            return Some(Coordinate::new(coord.chapter + 1, 0));
        }
        None
    }

    /// The coordinate before `coord` in reading order.
    pub fn prev_coordinate(&self, coord: Coordinate) -> Option<Coordinate> {
        if coord.page > 0 {
            return Some(Coordinate::new(coord.chapter, coord.page - 1));
        }
        let prev = coord.chapter.checked_sub(1)?;
        let chapter = self.chapters.get(prev)?;
        let count = chapter.page_count(self.measurer.as_ref(), &self.layout);
        Some(Coordinate::new(prev, count.saturating_sub(1)))
    }

    /// Drop every chapter's cached pages. Call after any layout parameter
    /// change; chapters re-measure lazily as they are next visited.
    pub fn invalidate_all(&self) {
        debug!("invalidating page caches for {} chapters", self.chapters.len());
        for chapter in &self.chapters {
            chapter.invalidate();
        }
    }

    /// Replace the layout parameters and invalidate all cached pages.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.invalidate_all();
    }

    /// Snapshot the coordinate for persistence.
    pub fn persisted_location(
        &self,
        chapter_index: usize,
        page_index: usize,
    ) -> Option<PersistedLocation> {
        // Validate the coordinate before snapshotting it.
        self.global_offset(chapter_index, page_index)?;
        Some(PersistedLocation {
            chapter_index,
            page_index,
            progress: self.progress(chapter_index, page_index),
        })
    }

    /// Resolve a stored location back to a coordinate, falling back to the
    /// start of the book when the coordinate no longer exists (a layout
    /// change may have shrunk a chapter's page count since it was saved).
    pub fn restore(&self, location: &PersistedLocation) -> Coordinate {
        let coord = Coordinate::new(location.chapter_index, location.page_index);
        if self.global_offset(coord.chapter, coord.page).is_some() {
            coord
        } else {
            Coordinate::new(0, 0)
        }
    }
}

impl fmt::Debug for BookIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookIndex")
            .field("book_len", &self.book.len())
            .field("chapters", &self.chapters.len())
            .field("layout", &self.layout)
            .finish()
    }
}
