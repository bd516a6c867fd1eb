//! Error types for folio operations.
//!
//! Lookups that can simply miss (an out-of-range coordinate, an offset past
//! the end of the book) return `Option`; absence is a normal answer, not an
//! error. `Error` is reserved for the persistence boundary, where I/O and
//! serialization genuinely fail.

use thiserror::Error;

/// Errors that can occur at the reading-position persistence boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid stored location: {0}")]
    InvalidLocation(String),

    #[cfg(feature = "persist")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
