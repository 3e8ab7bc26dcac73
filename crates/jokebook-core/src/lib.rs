//! Core types and trait definitions for the jokebook.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend, the API layer, and the client all depend on it.

// We intentionally use native `async fn` in traits.
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod joke;
pub mod memory;
pub mod store;

pub use error::{Error, Result};
pub use joke::{CategoryRecord, Joke, NewJoke};
