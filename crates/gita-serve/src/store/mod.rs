//! Storage seam for verse lookups.
//!
//! The repository composes the two read operations of [`VerseStore`]; the
//! production implementation is [`PgVerseStore`].

#[cfg(test)]
pub(crate) mod memory;
mod postgres;

use async_trait::async_trait;
use gita_core::{Commentary, Verse};

pub use self::postgres::PgVerseStore;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No connection could be obtained (pool closed, timed out, connect failed).
    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// The query itself failed.
    #[error("query failed: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// A row came back but a column could not be decoded.
    #[error("malformed {table} row, column '{column}': {reason}")]
    MalformedRow {
        table: &'static str,
        column: &'static str,
        reason: String,
    },
}

/// A row of the `verses` table, before its commentaries are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRow {
    pub id: String,
    pub chapter: Option<i64>,
    pub verse_number: Option<i64>,
    pub text: Option<String>,
    pub transliteration: Option<String>,
}

impl VerseRow {
    /// Attach commentaries to produce the full read model.
    pub fn with_commentaries(self, commentaries: Vec<Commentary>) -> Verse {
        Verse {
            id: self.id,
            chapter: self.chapter,
            verse_number: self.verse_number,
            text: self.text,
            transliteration: self.transliteration,
            commentaries,
        }
    }
}

/// Read-only access to the verse and commentary tables.
#[async_trait]
pub trait VerseStore: Send + Sync {
    /// Point lookup on `verses` by primary key.
    async fn find_verse(&self, verse_id: &str) -> Result<Option<VerseRow>, StoreError>;

    /// All `commentaries` rows for a verse, in storage return order.
    async fn find_commentaries(&self, verse_id: &str) -> Result<Vec<Commentary>, StoreError>;
}
