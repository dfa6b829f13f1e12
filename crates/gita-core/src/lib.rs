//! Core types shared by the Gita verse services.
//!
//! This crate provides:
//! - `VerseId`, the composite chapter/verse identifier and its storage key format
//! - `Verse` and `Commentary`, the JSON-facing read models
//! - Prometheus metrics helpers
//! - Shared error types

mod error;
pub mod metrics;
mod verse;

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

/// Book code prefixed to every verse key (Bhagavad Gita).
pub const BOOK_CODE: &str = "BG";

pub use error::{Error, Result};
pub use verse::{Commentary, Verse, VerseId};
