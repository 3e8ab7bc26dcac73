//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Error bodies are plain text. Store failures are logged here and reported
//! to the caller only as a generic message.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

pub(crate) const INVALID_CATEGORY_PARAM: &str = "Invalid category parameter";
pub(crate) const INVALID_CATEGORY: &str =
  "Invalid category. Please try a valid category.";
pub(crate) const INVALID_LIMIT: &str = "Invalid limit parameter";
pub(crate) const MISSING_PARAMS: &str = "Missing required parameters";
pub(crate) const SERVER_ERROR: &str = "Server error";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store query failed");
        (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR).into_response()
      }
    }
  }
}
