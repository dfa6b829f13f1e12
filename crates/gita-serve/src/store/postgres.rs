//! PostgreSQL (and CockroachDB) backed verse store.

use anyhow::Context;
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use gita_core::Commentary;
use tokio_postgres::types::FromSql;
use tokio_postgres::{NoTls, Row};

use super::{StoreError, VerseRow, VerseStore};
use crate::config::DatabaseConfig;

// Casts keep the integer width stable whether the column is INT4 (Postgres)
// or INT8 (CockroachDB's INT).
const SELECT_VERSE: &str = "SELECT id, chapter::INT8 AS chapter, verse::INT8 AS verse, \
     slok, transliteration \
     FROM verses \
     WHERE id = $1";

const SELECT_COMMENTARIES: &str = "SELECT verse_id, commentator, author, \
     english_translation, english_commentary, sanskrit_commentary, \
     hindi_translation, hindi_commentary \
     FROM commentaries \
     WHERE verse_id = $1";

/// Verse store over a `deadpool-postgres` connection pool.
///
/// Cloning is cheap; clones share the pool.
#[derive(Clone)]
pub struct PgVerseStore {
    pool: Pool,
}

impl PgVerseStore {
    /// Wrap an existing pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Build a pool from configuration and verify the database is reachable.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let pg_config = config
            .url
            .parse::<tokio_postgres::Config>()
            .context("failed to parse CONNECTION_STRING")?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .wait_timeout(Some(config.timeout))
            .create_timeout(Some(config.timeout))
            .recycle_timeout(Some(config.timeout))
            .build()
            .context("failed to create database pool")?;

        let store = Self::new(pool);
        store
            .ping()
            .await
            .context("failed to establish database connection")?;

        tracing::info!(pool_size = config.pool_size, "database connected");

        Ok(store)
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        client.query_one("SELECT 1", &[]).await?;
        Ok(())
    }
}

#[async_trait]
impl VerseStore for PgVerseStore {
    async fn find_verse(&self, verse_id: &str) -> Result<Option<VerseRow>, StoreError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(SELECT_VERSE, &[&verse_id]).await?;
        row.as_ref().map(verse_from_row).transpose()
    }

    async fn find_commentaries(&self, verse_id: &str) -> Result<Vec<Commentary>, StoreError> {
        let client = self.pool.get().await?;
        let rows = client.query(SELECT_COMMENTARIES, &[&verse_id]).await?;
        rows.iter().map(commentary_from_row).collect()
    }
}

fn verse_from_row(row: &Row) -> Result<VerseRow, StoreError> {
    const TABLE: &str = "verses";
    Ok(VerseRow {
        id: column(row, TABLE, "id")?,
        chapter: column(row, TABLE, "chapter")?,
        verse_number: column(row, TABLE, "verse")?,
        text: column(row, TABLE, "slok")?,
        transliteration: column(row, TABLE, "transliteration")?,
    })
}

fn commentary_from_row(row: &Row) -> Result<Commentary, StoreError> {
    const TABLE: &str = "commentaries";
    Ok(Commentary {
        verse_id: column(row, TABLE, "verse_id")?,
        commentator: column(row, TABLE, "commentator")?,
        author: column(row, TABLE, "author")?,
        english_translation: column(row, TABLE, "english_translation")?,
        english_commentary: column(row, TABLE, "english_commentary")?,
        sanskrit_commentary: column(row, TABLE, "sanskrit_commentary")?,
        hindi_translation: column(row, TABLE, "hindi_translation")?,
        hindi_commentary: column(row, TABLE, "hindi_commentary")?,
    })
}

/// Decode one column, reporting which one failed instead of panicking.
fn column<'a, T: FromSql<'a>>(
    row: &'a Row,
    table: &'static str,
    name: &'static str,
) -> Result<T, StoreError> {
    row.try_get(name).map_err(|e| StoreError::MalformedRow {
        table,
        column: name,
        reason: e.to_string(),
    })
}
