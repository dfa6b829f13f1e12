//! In-memory verse store for tests, with failure injection.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use deadpool_postgres::PoolError;
use gita_core::Commentary;

use super::{StoreError, VerseRow, VerseStore};

#[derive(Default)]
pub(crate) struct MemoryVerseStore {
    verses: Vec<VerseRow>,
    commentaries: Vec<Commentary>,
    fail_verse_lookup: bool,
    fail_commentaries: bool,
    verse_calls: AtomicUsize,
    commentary_calls: AtomicUsize,
}

impl MemoryVerseStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_verse(mut self, row: VerseRow) -> Self {
        self.verses.push(row);
        self
    }

    /// Commentaries are returned in the order they were added.
    pub(crate) fn with_commentary(mut self, commentary: Commentary) -> Self {
        self.commentaries.push(commentary);
        self
    }

    /// Every verse lookup fails as if the pool were closed.
    pub(crate) fn failing_verse_lookup(mut self) -> Self {
        self.fail_verse_lookup = true;
        self
    }

    /// Every commentary fetch fails as if a row could not be decoded.
    pub(crate) fn failing_commentaries(mut self) -> Self {
        self.fail_commentaries = true;
        self
    }

    pub(crate) fn verse_calls(&self) -> usize {
        self.verse_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn commentary_calls(&self) -> usize {
        self.commentary_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VerseStore for MemoryVerseStore {
    async fn find_verse(&self, verse_id: &str) -> Result<Option<VerseRow>, StoreError> {
        self.verse_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_verse_lookup {
            return Err(StoreError::Pool(PoolError::Closed));
        }
        Ok(self.verses.iter().find(|v| v.id == verse_id).cloned())
    }

    async fn find_commentaries(&self, verse_id: &str) -> Result<Vec<Commentary>, StoreError> {
        self.commentary_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_commentaries {
            return Err(StoreError::MalformedRow {
                table: "commentaries",
                column: "commentator",
                reason: "unexpected null".to_string(),
            });
        }
        Ok(self
            .commentaries
            .iter()
            .filter(|c| c.verse_id == verse_id)
            .cloned()
            .collect())
    }
}

/// A verse row with every column populated.
pub(crate) fn verse_row(id: &str, chapter: i64, verse: i64) -> VerseRow {
    VerseRow {
        id: id.to_string(),
        chapter: Some(chapter),
        verse_number: Some(verse),
        text: Some(format!("slok {id}")),
        transliteration: Some(format!("transliteration {id}")),
    }
}
