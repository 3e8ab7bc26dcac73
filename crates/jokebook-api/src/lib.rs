//! JSON HTTP API for the jokebook.
//!
//! Exposes an axum [`Router`] backed by any [`jokebook_core::store::JokeStore`].
//! Transport concerns (binding, tracing layers, static files) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/jokebook", jokebook_api::api_router(store.clone()))
//! ```

pub mod categories;
pub mod error;
pub mod jokes;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use jokebook_core::store::JokeStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: JokeStore + 'static,
{
  Router::new()
    .route("/categories", get(categories::list::<S>))
    .route("/category/", get(jokes::empty_category))
    .route("/category/{category}", get(jokes::by_category::<S>))
    .route("/random", get(jokes::random::<S>))
    .route("/joke/add", post(jokes::add::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
