//! Pure rendering: structured results in, display commands out.
//!
//! Nothing here touches the terminal or the network, so every message the
//! client can show is testable in isolation. The TUI draws [`Display`]
//! commands with ratatui; the one-shot subcommands print them as text.

use jokebook_core::{CategoryRecord, Joke, NewJoke};

use crate::client::Outcome;

pub const ERR_RANDOM: &str = "Error loading joke";
pub const ERR_CATEGORIES: &str = "Error loading categories.";
pub const ERR_SEARCH: &str = "Category not found or error loading jokes";
pub const ERR_ADD: &str = "Error adding joke.";
pub const EMPTY_SEARCH: &str = "Please enter a category name.";
pub const MISSING_FIELDS: &str = "All fields are required!";
pub const ADDED: &str = "Joke added successfully!";
pub const NO_JOKES: &str = "The jokebook is empty.";
pub const LOADING: &str = "Loading…";

/// An independently-updated area of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
  RandomJoke,
  Categories,
  SearchResults,
  AddResult,
}

impl Region {
  pub const ALL: [Region; 4] = [
    Region::RandomJoke,
    Region::Categories,
    Region::SearchResults,
    Region::AddResult,
  ];

  pub fn title(self) -> &'static str {
    match self {
      Region::RandomJoke => "Random joke",
      Region::Categories => "Categories",
      Region::SearchResults => "Results",
      Region::AddResult => "Added",
    }
  }

  /// The message shown when a request for this region fails.
  pub fn failure_message(self) -> &'static str {
    match self {
      Region::RandomJoke => ERR_RANDOM,
      Region::Categories => ERR_CATEGORIES,
      Region::SearchResults => ERR_SEARCH,
      Region::AddResult => ERR_ADD,
    }
  }
}

/// One display command. A region's contents are a `Vec<Display>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
  Text(String),
  /// Secondary text, e.g. the category under a random joke.
  Muted(String),
  Error(String),
  Success(String),
  JokeCard { setup: String, delivery: String },
  /// A selectable category control.
  CategoryButton(String),
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Setup, delivery, then category; or a notice if there are no jokes.
pub fn random_joke(joke: Option<&Joke>) -> Vec<Display> {
  match joke {
    Some(j) => vec![
      Display::Text(j.setup.clone()),
      Display::Text(j.delivery.clone()),
      Display::Muted(j.category.clone()),
    ],
    None => vec![Display::Muted(NO_JOKES.to_string())],
  }
}

pub fn categories(categories: &[CategoryRecord]) -> Vec<Display> {
  categories
    .iter()
    .map(|c| Display::CategoryButton(c.category.clone()))
    .collect()
}

pub fn joke_cards(jokes: &[Joke]) -> Vec<Display> {
  jokes
    .iter()
    .map(|j| Display::JokeCard {
      setup:    j.setup.clone(),
      delivery: j.delivery.clone(),
    })
    .collect()
}

/// Success notice followed by the category's refreshed jokes.
pub fn added(jokes: &[Joke]) -> Vec<Display> {
  let mut out = vec![Display::Success(ADDED.to_string())];
  out.extend(joke_cards(jokes));
  out
}

pub fn outcome(outcome: &Outcome) -> Vec<Display> {
  match outcome {
    Outcome::Random(joke) => random_joke(joke.as_ref()),
    Outcome::Categories(cats) => categories(cats),
    Outcome::Jokes(jokes) => joke_cards(jokes),
    Outcome::Added(jokes) => added(jokes),
  }
}

/// Replaces a region's contents after a failed request.
pub fn failure(region: Region) -> Vec<Display> {
  vec![Display::Error(region.failure_message().to_string())]
}

pub fn loading() -> Vec<Display> { vec![Display::Muted(LOADING.to_string())] }

/// Plain-text rendering, one line per text item.
pub fn to_plain_text(displays: &[Display]) -> String {
  let mut out = String::new();
  for d in displays {
    match d {
      Display::Text(t) | Display::Muted(t) | Display::Success(t) => {
        out.push_str(t);
        out.push('\n');
      }
      Display::Error(t) => {
        out.push_str("error: ");
        out.push_str(t);
        out.push('\n');
      }
      Display::JokeCard { setup, delivery } => {
        out.push_str(setup);
        out.push_str("\n  ");
        out.push_str(delivery);
        out.push_str("\n\n");
      }
      Display::CategoryButton(name) => {
        out.push_str("- ");
        out.push_str(name);
        out.push('\n');
      }
    }
  }
  out
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Trimmed category for a manual search.
pub fn validate_search(input: &str) -> Result<&str, &'static str> {
  match input.trim() {
    "" => Err(EMPTY_SEARCH),
    category => Ok(category),
  }
}

/// Trim all three fields and require each to be non-empty.
pub fn validate_new_joke(
  category: &str,
  setup: &str,
  delivery: &str,
) -> Result<NewJoke, &'static str> {
  NewJoke::new(category.trim(), setup.trim(), delivery.trim())
    .map_err(|_| MISSING_FIELDS)
}
