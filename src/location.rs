//! Reading-position persistence boundary.
//!
//! The core produces a [`PersistedLocation`] from [`BookIndex`] queries when
//! the app navigates or backgrounds, and consumes one at startup to restore
//! a [`Coordinate`]. How the location is stored is the collaborator's
//! business; [`LocationStore`] is the whole contract. Two implementations
//! ship with the crate: an in-memory map for tests and ephemeral sessions,
//! and a JSON file store (behind the `persist` feature) standing where the
//! original app kept a SQLite table.
//!
//! [`BookIndex`]: crate::BookIndex
//! [`Coordinate`]: crate::Coordinate

use std::collections::HashMap;

use crate::error::Result;

/// A saved reading position for one book.
///
/// `progress` is carried along for display ("37%") without needing to open
/// and paginate the book first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistedLocation {
    pub chapter_index: usize,
    pub page_index: usize,
    pub progress: f64,
}

/// Storage for per-book reading positions, keyed by an opaque book key.
pub trait LocationStore {
    /// The stored location for `book_key`, or `None` if none was saved.
    fn load(&self, book_key: &str) -> Result<Option<PersistedLocation>>;

    /// Save (or overwrite) the location for `book_key`.
    fn save(&mut self, book_key: &str, location: &PersistedLocation) -> Result<()>;
}

/// In-memory store. Positions last as long as the process.
#[derive(Debug, Default)]
pub struct MemoryLocationStore {
    entries: HashMap<String, PersistedLocation>,
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocationStore for MemoryLocationStore {
    fn load(&self, book_key: &str) -> Result<Option<PersistedLocation>> {
        Ok(self.entries.get(book_key).copied())
    }

    fn save(&mut self, book_key: &str, location: &PersistedLocation) -> Result<()> {
        self.entries.insert(book_key.to_string(), *location);
        Ok(())
    }
}

#[cfg(feature = "persist")]
pub use json_file::JsonFileStore;

#[cfg(feature = "persist")]
mod json_file {
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;

    use super::{LocationStore, PersistedLocation};
    use crate::error::{Error, Result};

    /// File-backed store: one JSON object mapping book keys to locations.
    ///
    /// The whole map is rewritten on every save, which is fine at the scale
    /// of a bookshelf.
    #[derive(Debug)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        fn read_all(&self) -> Result<HashMap<String, PersistedLocation>> {
            if !self.path.exists() {
                return Ok(HashMap::new());
            }
            let data = fs::read_to_string(&self.path)?;
            if data.trim().is_empty() {
                return Ok(HashMap::new());
            }
            Ok(serde_json::from_str(&data)?)
        }
    }

    impl LocationStore for JsonFileStore {
        fn load(&self, book_key: &str) -> Result<Option<PersistedLocation>> {
            let entries = self.read_all()?;
            let location = match entries.get(book_key) {
                Some(location) => *location,
                None => return Ok(None),
            };
            if !location.progress.is_finite() || !(0.0..=1.0).contains(&location.progress) {
                return Err(Error::InvalidLocation(format!(
                    "progress {} for key {:?} is outside [0, 1]",
                    location.progress, book_key
                )));
            }
            Ok(Some(location))
        }

        fn save(&mut self, book_key: &str, location: &PersistedLocation) -> Result<()> {
            let mut entries = self.read_all()?;
            entries.insert(book_key.to_string(), *location);
            fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
            Ok(())
        }
    }
}
