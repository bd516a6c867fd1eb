//! The immutable text of one document.

/// The full decoded text of a book, immutable for the session.
///
/// Construction takes an already-decoded string; file loading and encoding
/// detection belong to the caller. The optional display title is surfaced as
/// the header on every [`Page`].
///
/// [`Page`]: crate::Page
#[derive(Debug, Clone, Default)]
pub struct Book {
    text: String,
    title: Option<String>,
}

impl Book {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
