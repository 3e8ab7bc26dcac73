//! Stale-response guard.
//!
//! Requests are issued without coordination, so a slow early response can
//! arrive after a fast later one. Each dispatch takes a ticket for its region;
//! a response is applied only if it carries that region's latest ticket.

use std::{collections::HashMap, hash::Hash};

/// Issues monotonically increasing tickets per key.
#[derive(Debug)]
pub struct RequestTracker<K> {
  counter: u64,
  latest:  HashMap<K, u64>,
}

impl<K> Default for RequestTracker<K> {
  fn default() -> Self {
    Self {
      counter: 0,
      latest:  HashMap::new(),
    }
  }
}

impl<K: Eq + Hash + Copy> RequestTracker<K> {
  pub fn new() -> Self { Self::default() }

  /// Take a new ticket for `key`, invalidating every earlier one.
  pub fn next(&mut self, key: K) -> u64 {
    self.counter += 1;
    self.latest.insert(key, self.counter);
    self.counter
  }

  /// Whether `ticket` is still the newest for `key`.
  pub fn is_current(&self, key: K, ticket: u64) -> bool {
    self.latest.get(&key) == Some(&ticket)
  }
}
