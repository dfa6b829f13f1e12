//! Error types for verse identifiers.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or parsing verse identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A chapter or verse number is not a positive integer.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidNumber {
        /// Which component was rejected ("chapter" or "verse").
        field: &'static str,
        /// The raw input.
        value: String,
        /// Description of what's wrong.
        reason: &'static str,
    },

    /// A storage key does not have the `BG<chapter>.<verse>` shape.
    #[error("invalid verse id '{0}': expected {book}<chapter>.<verse>", book = crate::BOOK_CODE)]
    InvalidVerseId(String),
}
