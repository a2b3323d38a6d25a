//! Static lookup from HTTP status to user-facing error text.

use super::state::ErrorMessage;

/// One mapped status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorEntry {
    pub code: u16,
    pub title: &'static str,
    pub description: &'static str,
}

/// Per-screen table of error texts with a fallback for unmapped codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCatalog {
    entries: &'static [ErrorEntry],
    fallback_title: &'static str,
    fallback_description: &'static str,
}

/// Used by screens without specific texts.
pub const GENERIC_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Error", "Something went wrong. Please try again.");

impl ErrorCatalog {
    pub const fn new(fallback_title: &'static str, fallback_description: &'static str) -> Self {
        Self {
            entries: &[],
            fallback_title,
            fallback_description,
        }
    }

    pub const fn with_entries(self, entries: &'static [ErrorEntry]) -> Self {
        Self { entries, ..self }
    }

    /// Build the message shown for a failure with `code`.
    pub fn resolve(&self, code: u16, cause: impl Into<String>) -> ErrorMessage {
        let (title, description) = self
            .entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| (entry.title, entry.description))
            .unwrap_or((self.fallback_title, self.fallback_description));

        ErrorMessage {
            code,
            title: title.to_string(),
            description: description.to_string(),
            cause: cause.into(),
        }
    }
}
