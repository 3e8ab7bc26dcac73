//! [`SqliteStore`]: the SQLite implementation of [`JokeStore`].

use std::{num::NonZeroU32, path::Path};

use jokebook_core::{
  joke::{CategoryRecord, Joke, NewJoke},
  store::JokeStore,
};

use crate::{Result, schema::SCHEMA};

const JOKE_COLUMNS: &str = "id, category, setup, delivery";

fn joke_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Joke> {
  Ok(Joke {
    id:       row.get(0)?,
    category: row.get(1)?,
    setup:    row.get(2)?,
    delivery: row.get(3)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A jokebook backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("jokebook schema ready");
    Ok(())
  }

  /// Total number of stored jokes.
  pub async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM jokes", [], |r| r.get(0))?)
      })
      .await?;
    Ok(n.max(0) as u64)
  }
}

// ─── JokeStore impl ──────────────────────────────────────────────────────────

impl JokeStore for SqliteStore {
  type Error = crate::Error;

  async fn list_categories(&self) -> Result<Vec<CategoryRecord>> {
    let names: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT DISTINCT category FROM jokes ORDER BY category")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(names.into_iter().map(CategoryRecord::from).collect())
  }

  async fn list_by_category(
    &self,
    category: &str,
    limit: Option<NonZeroU32>,
  ) -> Result<Vec<Joke>> {
    let category = category.to_owned();
    // A negative LIMIT means "no limit" in SQLite.
    let limit_val = limit.map_or(-1_i64, |l| i64::from(l.get()));

    let jokes = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {JOKE_COLUMNS} FROM jokes WHERE category = ?1 LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![category, limit_val], joke_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(jokes)
  }

  async fn pick_random(&self) -> Result<Option<Joke>> {
    use rusqlite::OptionalExtension as _;

    let joke = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {JOKE_COLUMNS} FROM jokes ORDER BY RANDOM() LIMIT 1"),
              [],
              joke_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(joke)
  }

  async fn insert(&self, joke: &NewJoke) -> Result<Joke> {
    joke.validate()?;

    let category = joke.category.clone();
    let setup    = joke.setup.clone();
    let delivery = joke.delivery.clone();

    let stored = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO jokes (category, setup, delivery) VALUES (?1, ?2, ?3)
             RETURNING {JOKE_COLUMNS}"
          ),
          rusqlite::params![category, setup, delivery],
          joke_from_row,
        )?)
      })
      .await?;

    Ok(stored)
  }
}
