//! Joke records, the single entity of the jokebook.
//!
//! Categories are not a separate entity; they are the distinct values of
//! [`Joke::category`].

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A persisted joke. `id` is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
  pub id:       i64,
  pub category: String,
  pub setup:    String,
  pub delivery: String,
}

impl Joke {
  /// Whether this joke carries the given authored triple.
  pub fn matches(&self, new: &NewJoke) -> bool {
    self.category == new.category
      && self.setup == new.setup
      && self.delivery == new.delivery
  }
}

/// The authored fields of a joke, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJoke {
  pub category: String,
  pub setup:    String,
  pub delivery: String,
}

impl NewJoke {
  /// Build a joke, rejecting any empty field.
  pub fn new(
    category: impl Into<String>,
    setup: impl Into<String>,
    delivery: impl Into<String>,
  ) -> Result<Self> {
    let joke = Self {
      category: category.into(),
      setup:    setup.into(),
      delivery: delivery.into(),
    };
    joke.validate()?;
    Ok(joke)
  }

  /// Check the non-empty invariant. Stores call this before inserting, since
  /// the fields are public and may have been built without [`NewJoke::new`].
  pub fn validate(&self) -> Result<()> {
    if self.category.is_empty() {
      return Err(Error::MissingField("category"));
    }
    if self.setup.is_empty() {
      return Err(Error::MissingField("setup"));
    }
    if self.delivery.is_empty() {
      return Err(Error::MissingField("delivery"));
    }
    Ok(())
  }
}

/// One element of the categories listing: `{"category": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryRecord {
  pub category: String,
}

impl From<String> for CategoryRecord {
  fn from(category: String) -> Self { Self { category } }
}
