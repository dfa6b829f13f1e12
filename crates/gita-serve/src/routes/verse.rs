//! Verse lookup endpoint.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use gita_core::{Verse, VerseId};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /chapter/{chapter}/verse/{verse}`
///
/// Returns the verse `BG{chapter}.{verse}` with all of its commentaries.
/// Also served under `/api`.
pub async fn get_verse(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Verse>, ApiError> {
    let Path((chapter, verse)) = path?;
    let verse_id = VerseId::from_segments(&chapter, &verse)?;
    let key = verse_id.storage_key();

    match state.verses.fetch(&key).await? {
        Some(verse) => Ok(Json(verse)),
        None => Err(ApiError::NotFound(format!("verse {key}"))),
    }
}
