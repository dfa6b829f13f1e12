//! Gita Serve - HTTP API for Bhagavad Gita verses and their commentaries
//!
//! Serves one verse at a time, identified by chapter and verse number, with
//! every commentary attached to it. Read-only; the verse and commentary tables
//! are maintained by a separate ingestion process.
//!
//! # Architecture
//!
//! - **VerseStore**: Storage seam (PostgreSQL/CockroachDB via `PgVerseStore`)
//! - **VerseRepository**: Verse lookup plus dependent commentary fetch
//! - **AppState**: Shared repository and configuration
//! - **Routes**: Liveness, health, and verse endpoints behind a CORS policy

pub mod config;
mod cors;
mod error;
mod repository;
mod routes;
mod state;
pub mod store;

pub use self::config::Config;
pub use self::cors::cors_layer;
pub use self::error::ApiError;
pub use self::repository::{FetchError, VerseRepository};
pub use self::routes::router;
pub use self::state::AppState;
pub use self::store::{PgVerseStore, StoreError, VerseStore};
