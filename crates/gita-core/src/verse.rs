//! Verse identifiers and the verse/commentary read models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BOOK_CODE;
use crate::error::{Error, Result};

/// Identifies one verse by chapter and verse number.
///
/// Displays as the storage key, e.g. `BG2.47`. Both numbers are positive;
/// leading zeros in the input are normalized away (`"02"` becomes `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VerseId {
    chapter: u32,
    verse: u32,
}

impl VerseId {
    /// Create an identifier from already-parsed numbers.
    pub fn new(chapter: u32, verse: u32) -> Result<Self> {
        if chapter == 0 {
            return Err(Error::InvalidNumber {
                field: "chapter",
                value: chapter.to_string(),
                reason: "must be greater than zero",
            });
        }
        if verse == 0 {
            return Err(Error::InvalidNumber {
                field: "verse",
                value: verse.to_string(),
                reason: "must be greater than zero",
            });
        }
        Ok(Self { chapter, verse })
    }

    /// Build an identifier from raw URL path segments.
    pub fn from_segments(chapter: &str, verse: &str) -> Result<Self> {
        let chapter = parse_number("chapter", chapter)?;
        let verse = parse_number("verse", verse)?;
        Self::new(chapter, verse)
    }

    /// Chapter number.
    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    /// Verse number within the chapter.
    pub fn verse(&self) -> u32 {
        self.verse
    }

    /// The primary key of this verse in the `verses` table.
    pub fn storage_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VerseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}.{}", BOOK_CODE, self.chapter, self.verse)
    }
}

impl FromStr for VerseId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (chapter, verse) = s
            .strip_prefix(BOOK_CODE)
            .and_then(|rest| rest.split_once('.'))
            .ok_or_else(|| Error::InvalidVerseId(s.to_string()))?;

        Self::from_segments(chapter, verse).map_err(|_| Error::InvalidVerseId(s.to_string()))
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidNumber {
            field,
            value: raw.to_string(),
            reason: "must not be empty",
        });
    }
    // u32::from_str accepts a leading '+', which is not a valid key component
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidNumber {
            field,
            value: raw.to_string(),
            reason: "must contain only digits",
        });
    }
    trimmed.parse().map_err(|_| Error::InvalidNumber {
        field,
        value: raw.to_string(),
        reason: "out of range",
    })
}

/// A verse with all of its commentaries.
///
/// `None` fields are omitted from JSON so callers can tell missing data apart
/// from empty strings. `commentaries` is always serialized, as `[]` when the
/// verse has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Storage key, e.g. `BG2.47`.
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<i64>,

    #[serde(
        rename = "verse",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub verse_number: Option<i64>,

    /// Sanskrit verse text.
    #[serde(rename = "slok", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,

    /// Commentaries in storage return order.
    #[serde(default)]
    pub commentaries: Vec<Commentary>,
}

/// One commentator's annotation on a verse.
///
/// A commentator may supply any subset of the text fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commentary {
    pub verse_id: String,
    pub commentator: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_translation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_commentary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanskrit_commentary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hindi_translation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hindi_commentary: Option<String>,
}

impl Commentary {
    /// A commentary with only the required fields set.
    pub fn new(verse_id: impl Into<String>, commentator: impl Into<String>) -> Self {
        Self {
            verse_id: verse_id.into(),
            commentator: commentator.into(),
            author: None,
            english_translation: None,
            english_commentary: None,
            sanskrit_commentary: None,
            hindi_translation: None,
            hindi_commentary: None,
        }
    }
}
