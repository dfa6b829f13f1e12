//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::repository::VerseRepository;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Verse lookups against the shared connection pool.
    pub verses: VerseRepository,

    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new application state from configuration and a repository.
    pub fn new(config: Config, verses: VerseRepository) -> Self {
        Self {
            verses,
            config: Arc::new(config),
        }
    }
}
