//! Verse retrieval: a verse row plus its commentaries, fetched as one unit.

use std::sync::Arc;
use std::time::Instant;

use gita_core::Verse;
use gita_core::metrics::{
    VERSE_COMMENTARIES_RETURNED, VERSE_FETCH_DURATION_SECONDS, VERSE_FETCH_TOTAL,
};
use metrics::{counter, histogram};

use crate::store::{StoreError, VerseStore};

/// A storage failure during [`VerseRepository::fetch`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The verse lookup failed; commentaries were never queried.
    #[error("verse lookup failed for {verse_id}: {source}")]
    Verse {
        verse_id: String,
        #[source]
        source: StoreError,
    },

    /// The verse was found but its commentaries could not be fetched.
    #[error("commentary fetch failed for {verse_id}: {source}")]
    Commentaries {
        verse_id: String,
        #[source]
        source: StoreError,
    },
}

/// Fetches verses together with their commentaries.
///
/// Holds no per-request state, so one instance is shared by all handlers.
#[derive(Clone)]
pub struct VerseRepository {
    store: Arc<dyn VerseStore>,
}

impl VerseRepository {
    pub fn new(store: Arc<dyn VerseStore>) -> Self {
        Self { store }
    }

    /// Fetch a verse by storage key (e.g. `BG2.47`).
    ///
    /// Returns `Ok(None)` when no verse has this key. The commentary query
    /// runs only after the verse is found, and any failure in either query
    /// yields an error rather than a partially filled verse.
    pub async fn fetch(&self, verse_id: &str) -> Result<Option<Verse>, FetchError> {
        let started = Instant::now();
        let result = self.fetch_with_commentaries(verse_id).await;
        histogram!(VERSE_FETCH_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        match &result {
            Ok(Some(verse)) => {
                counter!(VERSE_FETCH_TOTAL, "outcome" => "found").increment(1);
                histogram!(VERSE_COMMENTARIES_RETURNED).record(verse.commentaries.len() as f64);
                tracing::debug!(
                    verse_id = %verse_id,
                    commentaries = verse.commentaries.len(),
                    "verse fetched"
                );
            }
            Ok(None) => {
                counter!(VERSE_FETCH_TOTAL, "outcome" => "absent").increment(1);
                tracing::debug!(verse_id = %verse_id, "verse not found");
            }
            Err(_) => {
                counter!(VERSE_FETCH_TOTAL, "outcome" => "error").increment(1);
            }
        }

        result
    }

    async fn fetch_with_commentaries(&self, verse_id: &str) -> Result<Option<Verse>, FetchError> {
        let Some(row) = self
            .store
            .find_verse(verse_id)
            .await
            .map_err(|source| FetchError::Verse {
                verse_id: verse_id.to_string(),
                source,
            })?
        else {
            return Ok(None);
        };

        // Keyed on the stored id, not the caller's input.
        let commentaries = self
            .store
            .find_commentaries(&row.id)
            .await
            .map_err(|source| FetchError::Commentaries {
                verse_id: row.id.clone(),
                source,
            })?;

        Ok(Some(row.with_commentaries(commentaries)))
    }
}
