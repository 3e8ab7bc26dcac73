//! [`MemoryStore`]: a [`JokeStore`] held in process memory.
//!
//! Used as a substitute for a real backend in tests and quick demos.

use std::{
  collections::BTreeSet,
  num::NonZeroU32,
  sync::{Mutex, MutexGuard, PoisonError},
};

use rand::seq::IndexedRandom as _;

use crate::{
  Error,
  joke::{CategoryRecord, Joke, NewJoke},
  store::JokeStore,
};

#[derive(Debug, Default)]
struct Inner {
  jokes:   Vec<Joke>,
  next_id: i64,
}

/// An in-memory jokebook. Ids start at 1 and increase by one per insert.
#[derive(Debug, Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Build a store pre-populated with `jokes`, assigning ids in order.
  pub fn with_jokes(jokes: impl IntoIterator<Item = NewJoke>) -> Result<Self, Error> {
    let store = Self::new();
    {
      let mut inner = store.lock();
      for joke in jokes {
        Self::push(&mut inner, &joke)?;
      }
    }
    Ok(store)
  }

  /// Number of stored jokes.
  pub fn len(&self) -> usize { self.lock().jokes.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn push(inner: &mut Inner, new: &NewJoke) -> Result<Joke, Error> {
    new.validate()?;
    inner.next_id += 1;
    let joke = Joke {
      id:       inner.next_id,
      category: new.category.clone(),
      setup:    new.setup.clone(),
      delivery: new.delivery.clone(),
    };
    inner.jokes.push(joke.clone());
    Ok(joke)
  }
}

impl JokeStore for MemoryStore {
  type Error = Error;

  async fn list_categories(&self) -> Result<Vec<CategoryRecord>, Error> {
    let inner = self.lock();
    let distinct: BTreeSet<&str> =
      inner.jokes.iter().map(|j| j.category.as_str()).collect();
    Ok(
      distinct
        .into_iter()
        .map(|c| CategoryRecord::from(c.to_owned()))
        .collect(),
    )
  }

  async fn list_by_category(
    &self,
    category: &str,
    limit: Option<NonZeroU32>,
  ) -> Result<Vec<Joke>, Error> {
    let cap = limit.map_or(usize::MAX, |l| l.get() as usize);
    let inner = self.lock();
    Ok(
      inner
        .jokes
        .iter()
        .filter(|j| j.category == category)
        .take(cap)
        .cloned()
        .collect(),
    )
  }

  async fn pick_random(&self) -> Result<Option<Joke>, Error> {
    let inner = self.lock();
    Ok(inner.jokes.choose(&mut rand::rng()).cloned())
  }

  async fn insert(&self, joke: &NewJoke) -> Result<Joke, Error> {
    let mut inner = self.lock();
    Self::push(&mut inner, joke)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn joke(category: &str, setup: &str) -> NewJoke {
    NewJoke::new(category, setup, "punchline").unwrap()
  }

  #[tokio::test]
  async fn insert_assigns_increasing_ids() {
    let s = MemoryStore::new();
    let a = s.insert(&joke("Puns", "one")).await.unwrap();
    let b = s.insert(&joke("Puns", "two")).await.unwrap();
    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
    assert_eq!(s.len(), 2);
  }

  #[tokio::test]
  async fn insert_rejects_empty_fields() {
    let s = MemoryStore::new();
    let bad = NewJoke {
      category: "Puns".into(),
      setup:    String::new(),
      delivery: "d".into(),
    };
    assert_eq!(
      s.insert(&bad).await.unwrap_err(),
      Error::MissingField("setup")
    );
    assert!(s.is_empty());
  }

  #[tokio::test]
  async fn categories_are_distinct_and_sorted() {
    let s = MemoryStore::with_jokes([
      joke("Puns", "a"),
      joke("Dad", "b"),
      joke("Puns", "c"),
      joke("Animals", "d"),
    ])
    .unwrap();

    let cats: Vec<String> = s
      .list_categories()
      .await
      .unwrap()
      .into_iter()
      .map(|c| c.category)
      .collect();
    assert_eq!(cats, ["Animals", "Dad", "Puns"]);
  }

  #[tokio::test]
  async fn list_by_category_is_exact_and_capped() {
    let s = MemoryStore::with_jokes([
      joke("Puns", "a"),
      joke("puns", "b"),
      joke("Puns", "c"),
      joke("Puns", "d"),
    ])
    .unwrap();

    let all = s.list_by_category("Puns", None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|j| j.category == "Puns"));

    let two = s.list_by_category("Puns", NonZeroU32::new(2)).await.unwrap();
    assert_eq!(two.len(), 2);
  }

  #[tokio::test]
  async fn pick_random_on_empty_is_none() {
    let s = MemoryStore::new();
    assert!(s.pick_random().await.unwrap().is_none());

    s.insert(&joke("Puns", "a")).await.unwrap();
    let picked = s.pick_random().await.unwrap().unwrap();
    assert_eq!(picked.setup, "a");
  }
}
