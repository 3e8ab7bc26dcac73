//! Handlers for joke endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/category/:category` | Optional `?limit=N`; 400 when nothing matches |
//! | `GET`  | `/random` | 204 when the store is empty |
//! | `POST` | `/joke/add` | Form, multipart or JSON body: [`AddJokeBody`]; returns the category's jokes |

use std::{num::NonZeroU32, sync::Arc};

use axum::{
  Form, Json,
  extract::{
    FromRequest, Multipart, Path, Query, Request, State, multipart::MultipartError,
  },
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use jokebook_core::{Joke, NewJoke, store::JokeStore};
use serde::Deserialize;

use crate::error::{
  ApiError, INVALID_CATEGORY, INVALID_CATEGORY_PARAM, INVALID_LIMIT,
  MISSING_PARAMS,
};

// ─── By category ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct CategoryParams {
  /// Positive row cap. Kept as text so a bad value is our 400, not a
  /// generic extractor rejection.
  pub limit: Option<String>,
}

/// Parse the optional `limit` query value. Empty means absent.
pub fn parse_limit(raw: Option<&str>) -> Result<Option<NonZeroU32>, ApiError> {
  match raw.map(str::trim) {
    None | Some("") => Ok(None),
    Some(s) => s
      .parse::<NonZeroU32>()
      .map(Some)
      .map_err(|_| ApiError::BadRequest(INVALID_LIMIT)),
  }
}

/// `GET /category/:category[?limit=N]`
///
/// An unknown category and a category with no jokes both answer 400; callers
/// cannot tell them apart.
pub async fn by_category<S>(
  State(store): State<Arc<S>>,
  Path(category): Path<String>,
  Query(params): Query<CategoryParams>,
) -> Result<Json<Vec<Joke>>, ApiError>
where
  S: JokeStore,
{
  if category.is_empty() {
    return Err(ApiError::BadRequest(INVALID_CATEGORY_PARAM));
  }
  let limit = parse_limit(params.limit.as_deref())?;

  let jokes = store
    .list_by_category(&category, limit)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if jokes.is_empty() {
    return Err(ApiError::BadRequest(INVALID_CATEGORY));
  }
  Ok(Json(jokes))
}

/// `GET /category/`: the category segment is missing altogether.
pub async fn empty_category() -> ApiError {
  ApiError::BadRequest(INVALID_CATEGORY_PARAM)
}

// ─── Random ──────────────────────────────────────────────────────────────────

/// `GET /random`: one joke, or 204 No Content if there are none.
pub async fn random<S>(State(store): State<Arc<S>>) -> Result<Response, ApiError>
where
  S: JokeStore,
{
  let joke = store
    .pick_random()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(match joke {
    Some(joke) => Json(joke).into_response(),
    None => StatusCode::NO_CONTENT.into_response(),
  })
}

// ─── Add ─────────────────────────────────────────────────────────────────────

/// Body accepted by `POST /joke/add`: urlencoded, multipart or JSON.
///
/// Every field is optional at the extractor level so that a missing field is
/// reported as [`MISSING_PARAMS`] rather than as a deserialisation failure.
#[derive(Debug, Default, Deserialize)]
pub struct AddJokeBody {
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub setup:    Option<String>,
  #[serde(default)]
  pub delivery: Option<String>,
}

impl AddJokeBody {
  /// Presence check: every field must be given and non-empty.
  pub fn into_new_joke(self) -> Result<NewJoke, ApiError> {
    match (self.category, self.setup, self.delivery) {
      (Some(category), Some(setup), Some(delivery)) => {
        NewJoke::new(category, setup, delivery)
          .map_err(|_| ApiError::BadRequest(MISSING_PARAMS))
      }
      _ => Err(ApiError::BadRequest(MISSING_PARAMS)),
    }
  }
}

/// Encodings accepted for an add body, keyed off `Content-Type`.
enum BodyKind {
  Json,
  Multipart,
  Form,
}

impl BodyKind {
  fn of(req: &Request) -> Self {
    let ct = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .unwrap_or_default();
    if ct.starts_with("application/json") {
      BodyKind::Json
    } else if ct.starts_with("multipart/form-data") {
      BodyKind::Multipart
    } else {
      BodyKind::Form
    }
  }
}

impl AddJokeBody {
  /// Collect the text fields of a `multipart/form-data` body. Unknown fields
  /// are skipped; a repeated field keeps its last value.
  async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
    let mut body = AddJokeBody::default();
    while let Some(field) = multipart.next_field().await? {
      let slot = match field.name() {
        Some("category") => &mut body.category,
        Some("setup") => &mut body.setup,
        Some("delivery") => &mut body.delivery,
        _ => continue,
      };
      *slot = Some(field.text().await?);
    }
    Ok(body)
  }
}

impl<S> FromRequest<S> for AddJokeBody
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    match BodyKind::of(&req) {
      BodyKind::Json => {
        let Json(body) = Json::<AddJokeBody>::from_request(req, state)
          .await
          .map_err(|e| {
            tracing::debug!(rejection = %e.body_text(), "unreadable JSON body");
            ApiError::BadRequest(MISSING_PARAMS)
          })?;
        Ok(body)
      }
      BodyKind::Multipart => {
        let multipart = Multipart::from_request(req, state).await.map_err(|e| {
          tracing::debug!(rejection = %e.body_text(), "unreadable multipart body");
          ApiError::BadRequest(MISSING_PARAMS)
        })?;
        AddJokeBody::from_multipart(multipart).await.map_err(|e| {
          tracing::debug!(rejection = %e.body_text(), "malformed multipart field");
          ApiError::BadRequest(MISSING_PARAMS)
        })
      }
      BodyKind::Form => {
        let Form(body) = Form::<AddJokeBody>::from_request(req, state)
          .await
          .map_err(|e| {
            tracing::debug!(rejection = %e.body_text(), "unreadable form body");
            ApiError::BadRequest(MISSING_PARAMS)
          })?;
        Ok(body)
      }
    }
  }
}

/// `POST /joke/add`: inserts, then returns every joke in the new joke's
/// category so the caller can refresh its view.
pub async fn add<S>(
  State(store): State<Arc<S>>,
  body: AddJokeBody,
) -> Result<Json<Vec<Joke>>, ApiError>
where
  S: JokeStore,
{
  let new = body.into_new_joke()?;

  let stored = store
    .insert(&new)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(id = stored.id, category = %stored.category, "joke added");

  let jokes = store
    .list_by_category(&stored.category, None)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(jokes))
}
