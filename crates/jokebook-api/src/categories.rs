//! Handler for `GET /categories`.

use std::sync::Arc;

use axum::{Json, extract::State};
use jokebook_core::{CategoryRecord, store::JokeStore};

use crate::error::ApiError;

/// `GET /categories`: distinct categories, ascending.
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CategoryRecord>>, ApiError>
where
  S: JokeStore,
{
  let categories = store
    .list_categories()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(categories))
}
