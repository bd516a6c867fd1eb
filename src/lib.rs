//! # folio
//!
//! Chapter segmentation and lazy pagination for plain-text books.
//!
//! folio takes one big decoded string and turns it into a stable, queryable
//! structure of chapters and pages, suitable for driving a paged reading UI
//! and for saving/restoring a reading position.
//!
//! ## Features
//!
//! - Heuristic chapter segmentation over heading patterns ("第一章", ...),
//!   with preface detection, table-of-contents merging, and a fixed-size
//!   chunking fallback
//! - Lazy per-chapter pagination through an injected [`TextMeasurer`],
//!   cached until layout parameters change
//! - Exact bidirectional mapping between global text offsets, `(chapter,
//!   page)` coordinates, and reading-progress fractions
//! - Reading-position persistence at a small [`LocationStore`] boundary
//!
//! ## Quick Start
//!
//! ```
//! use folio::{Book, BookIndex, GridMeasurer, Layout, Size, TextStyle};
//!
//! let text = format!(
//!     "第一章 起\n{}\n第二章 落\n{}",
//!     "云".repeat(60),
//!     "海".repeat(60),
//! );
//! let book = Book::new(text).with_title("试卷");
//! let layout = Layout::new(TextStyle::default(), Size::new(320.0, 480.0));
//! let index = BookIndex::new(book, Box::new(GridMeasurer), layout);
//!
//! assert_eq!(index.chapter_count(), 2);
//! assert_eq!(index.chapters()[1].title(), Some("第二章"));
//!
//! // Fetch a page and see how far into the book it is.
//! let page = index.page_at(1, 0).unwrap();
//! assert!(page.content.contains("第二章"));
//! assert!(page.progress > 0.0);
//!
//! // Offsets and coordinates round-trip.
//! let offset = index.global_offset(1, 0).unwrap();
//! let coord = index.locate(offset).unwrap();
//! assert_eq!((coord.chapter, coord.page), (1, 0));
//! ```
//!
//! ## Layout changes
//!
//! Pagination depends on the font and viewport. When either changes, call
//! [`BookIndex::set_layout`] (or [`BookIndex::invalidate_all`]): every
//! chapter drops its cached pages and re-measures lazily on next access. A
//! coordinate saved before the change may no longer exist afterwards;
//! [`BookIndex::restore`] falls back to the start of the book in that case,
//! and [`BookIndex::page_index_in_chapter`] re-finds the page containing a
//! known text position.

pub mod book;
pub mod chapter;
pub mod error;
pub mod index;
pub mod location;
pub mod measure;
pub mod segment;
pub(crate) mod util;

pub use book::Book;
pub use chapter::Chapter;
pub use error::{Error, Result};
pub use index::{BookIndex, Coordinate, Page};
#[cfg(feature = "persist")]
pub use location::JsonFileStore;
pub use location::{LocationStore, MemoryLocationStore, PersistedLocation};
pub use measure::{GridMeasurer, Layout, Size, TextMeasurer, TextStyle};
pub use segment::Segment;
