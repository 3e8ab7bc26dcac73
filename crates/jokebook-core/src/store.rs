//! The `JokeStore` trait.
//!
//! Implemented by storage backends (`jokebook-store-sqlite`, and the
//! in-memory [`MemoryStore`](crate::memory::MemoryStore) used in tests).
//! The API layer depends on this abstraction, never on a concrete backend.

use std::{future::Future, num::NonZeroU32};

use crate::joke::{CategoryRecord, Joke, NewJoke};

/// Abstraction over a jokebook backend.
///
/// Jokes are append-only: there is no update or delete.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait JokeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Distinct category values, ascending.
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<CategoryRecord>, Self::Error>> + Send + '_;

  /// All jokes whose category equals `category` exactly (case-sensitive),
  /// capped at `limit` rows when given. No ordering is guaranteed.
  fn list_by_category<'a>(
    &'a self,
    category: &'a str,
    limit: Option<NonZeroU32>,
  ) -> impl Future<Output = Result<Vec<Joke>, Self::Error>> + Send + 'a;

  /// One joke chosen uniformly at random, or `None` if the store is empty.
  fn pick_random(
    &self,
  ) -> impl Future<Output = Result<Option<Joke>, Self::Error>> + Send + '_;

  /// Persist a new joke and return it with its assigned id.
  fn insert<'a>(
    &'a self,
    joke: &'a NewJoke,
  ) -> impl Future<Output = Result<Joke, Self::Error>> + Send + 'a;
}
