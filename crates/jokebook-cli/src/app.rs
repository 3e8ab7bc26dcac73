//! Application state machine and event dispatcher.
//!
//! `App` never performs I/O. Key presses and server replies mutate state;
//! network work is queued in an outbox that the event loop drains and runs on
//! spawned tasks. Replies come back tagged with the ticket they were issued
//! under, and [`RequestTracker`] drops any that a newer request has superseded.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

use crate::{
  client::{Call, Outcome},
  sequence::RequestTracker,
  view::{self, Display, Region},
};

// ─── Focus ────────────────────────────────────────────────────────────────────

/// A field of the add-joke form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Category,
  Setup,
  Delivery,
}

impl Field {
  pub fn label(self) -> &'static str {
    match self {
      Field::Category => "Category",
      Field::Setup => "Setup",
      Field::Delivery => "Delivery",
    }
  }
}

/// Which control receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Categories,
  Search,
  Add(Field),
}

impl Focus {
  const CYCLE: [Focus; 5] = [
    Focus::Categories,
    Focus::Search,
    Focus::Add(Field::Category),
    Focus::Add(Field::Setup),
    Focus::Add(Field::Delivery),
  ];

  fn position(self) -> usize {
    Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0)
  }

  pub fn next(self) -> Self {
    Self::CYCLE[(self.position() + 1) % Self::CYCLE.len()]
  }

  pub fn prev(self) -> Self {
    let len = Self::CYCLE.len();
    Self::CYCLE[(self.position() + len - 1) % len]
  }
}

// ─── Add form ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
  pub category: String,
  pub setup:    String,
  pub delivery: String,
}

impl AddForm {
  pub fn field(&self, field: Field) -> &str {
    match field {
      Field::Category => &self.category,
      Field::Setup => &self.setup,
      Field::Delivery => &self.delivery,
    }
  }

  fn field_mut(&mut self, field: Field) -> &mut String {
    match field {
      Field::Category => &mut self.category,
      Field::Setup => &mut self.setup,
      Field::Delivery => &mut self.delivery,
    }
  }

  pub fn clear(&mut self) { *self = Self::default(); }
}

// ─── Requests and replies ─────────────────────────────────────────────────────

/// A call waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
  pub region: Region,
  pub ticket: u64,
  pub call:   Call,
}

/// A finished call, as reported by the task that ran it.
#[derive(Debug, Clone)]
pub struct Reply {
  pub region: Region,
  pub ticket: u64,
  pub result: Result<Outcome, String>,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current keyboard focus.
  pub focus: Focus,

  /// Rendered contents of each region.
  pub regions: HashMap<Region, Vec<Display>>,

  /// Category names from the last successful listing.
  pub categories: Vec<String>,

  /// Current fuzzy-filter string over `categories`.
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* category list.
  pub list_cursor: usize,

  pub search_input: String,

  pub form: AddForm,

  /// Requests dispatched whose replies have not yet arrived.
  pub in_flight: usize,

  tracker: RequestTracker<Region>,
  outbox:  Vec<Pending>,
}

impl Default for App {
  fn default() -> Self { Self::new() }
}

impl App {
  pub fn new() -> Self {
    let regions = Region::ALL
      .into_iter()
      .map(|r| (r, Vec::new()))
      .collect();
    Self {
      focus: Focus::Categories,
      regions,
      categories: Vec::new(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      search_input: String::new(),
      form: AddForm::default(),
      in_flight: 0,
      tracker: RequestTracker::new(),
      outbox: Vec::new(),
    }
  }

  /// Queue the initial loads: a random joke and the category list.
  pub fn start(&mut self) {
    self.regions.insert(Region::RandomJoke, view::loading());
    self.regions.insert(Region::Categories, view::loading());
    self.request(Call::Random);
    self.request(Call::Categories);
  }

  pub fn region(&self, region: Region) -> &[Display] {
    self.regions.get(&region).map(Vec::as_slice).unwrap_or_default()
  }

  // ── Dispatch ──────────────────────────────────────────────────────────────

  fn request(&mut self, call: Call) {
    let region = call.region();
    let ticket = self.tracker.next(region);
    self.in_flight += 1;
    self.outbox.push(Pending { region, ticket, call });
  }

  /// Drain queued calls for the event loop to run.
  pub fn take_outbox(&mut self) -> Vec<Pending> { std::mem::take(&mut self.outbox) }

  /// Render a locally-produced result. Takes a ticket so that any reply
  /// still in flight for the region cannot overwrite it.
  fn show_local(&mut self, region: Region, displays: Vec<Display>) {
    self.tracker.next(region);
    self.regions.insert(region, displays);
  }

  /// Apply a finished call. Returns `false` if the reply was stale.
  pub fn apply(&mut self, reply: Reply) -> bool {
    self.in_flight = self.in_flight.saturating_sub(1);

    if !self.tracker.is_current(reply.region, reply.ticket) {
      tracing::debug!(region = ?reply.region, ticket = reply.ticket, "dropping stale reply");
      return false;
    }

    match reply.result {
      Ok(outcome) => {
        let displays = view::outcome(&outcome);
        match outcome {
          Outcome::Categories(cats) => {
            self.categories = cats.into_iter().map(|c| c.category).collect();
            self.clamp_cursor();
          }
          Outcome::Added(_) => {
            self.form.clear();
            // A new category may have been introduced.
            self.request(Call::Categories);
          }
          Outcome::Random(_) | Outcome::Jokes(_) => {}
        }
        self.regions.insert(reply.region, displays);
      }
      Err(error) => {
        tracing::warn!(region = ?reply.region, %error, "request failed");
        if reply.region == Region::Categories {
          self.categories.clear();
          self.list_cursor = 0;
        }
        self.regions.insert(reply.region, view::failure(reply.region));
      }
    }
    true
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  pub fn load_random(&mut self) { self.request(Call::Random); }

  pub fn load_category(&mut self, category: String) {
    self.request(Call::Category { category, limit: None });
  }

  /// Manual search: validate locally, then behave like selecting a category.
  pub fn search(&mut self) {
    match view::validate_search(&self.search_input) {
      Ok(category) => {
        let category = category.to_owned();
        self.load_category(category);
      }
      Err(message) => {
        self.show_local(Region::SearchResults, vec![Display::Error(message.into())]);
      }
    }
  }

  pub fn submit_form(&mut self) {
    match view::validate_new_joke(
      &self.form.category,
      &self.form.setup,
      &self.form.delivery,
    ) {
      Ok(joke) => self.request(Call::Add(joke)),
      Err(message) => {
        self.show_local(Region::AddResult, vec![Display::Error(message.into())]);
      }
    }
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Categories that match the current filter query.
  pub fn filtered_categories(&self) -> Vec<&str> {
    if self.filter.is_empty() {
      return self.categories.iter().map(String::as_str).collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .categories
      .iter()
      .filter(|c| matcher.fuzzy_match(c, &self.filter).is_some())
      .map(String::as_str)
      .collect()
  }

  /// The category under the list cursor in the filtered view, if any.
  pub fn cursor_category(&self) -> Option<&str> {
    self.filtered_categories().get(self.list_cursor).copied()
  }

  fn clamp_cursor(&mut self) {
    let len = self.filtered_categories().len();
    if self.list_cursor >= len {
      self.list_cursor = len.saturating_sub(1);
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return true;
    }

    match key.code {
      KeyCode::Tab => {
        self.focus = self.focus.next();
        return true;
      }
      KeyCode::BackTab => {
        self.focus = self.focus.prev();
        return true;
      }
      _ => {}
    }

    match self.focus {
      Focus::Categories => return self.handle_list_key(key),
      Focus::Search => self.handle_search_key(key),
      Focus::Add(field) => self.handle_form_key(field, key),
    }
    true
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        // Load straight away if the filter leaves exactly one category.
        let only = match self.filtered_categories().as_slice() {
          [only] => Some((*only).to_owned()),
          _ => None,
        };
        if let Some(category) = only {
          self.load_category(category);
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_categories().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(category) = self.cursor_category().map(str::to_owned) {
          self.load_category(category);
        }
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      KeyCode::Char('r') => self.load_random(),

      _ => {}
    }
    true
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.focus = Focus::Categories,
      KeyCode::Enter => self.search(),
      KeyCode::Backspace => {
        self.search_input.pop();
      }
      KeyCode::Char(c) => self.search_input.push(c),
      _ => {}
    }
  }

  fn handle_form_key(&mut self, field: Field, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.focus = Focus::Categories,
      KeyCode::Enter => self.submit_form(),
      KeyCode::Up => self.focus = self.focus.prev(),
      KeyCode::Down => self.focus = self.focus.next(),
      KeyCode::Backspace => {
        self.form.field_mut(field).pop();
      }
      KeyCode::Char(c) => self.form.field_mut(field).push(c),
      _ => {}
    }
  }
}
