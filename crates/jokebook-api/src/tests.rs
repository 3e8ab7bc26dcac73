//! Router-level tests driving the API with `tower::ServiceExt::oneshot`.

use std::{num::NonZeroU32, sync::Arc};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use jokebook_core::{
  CategoryRecord, Joke, NewJoke, memory::MemoryStore, store::JokeStore,
};
use jokebook_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

use crate::{api_router, jokes::parse_limit};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn seed() -> Vec<NewJoke> {
  vec![
    NewJoke::new("Puns", "I used to be a banker", "but I lost interest").unwrap(),
    NewJoke::new("Dad", "What do you call a fake noodle?", "An impasta").unwrap(),
    NewJoke::new("Puns", "Time flies like an arrow", "Fruit flies like a banana").unwrap(),
    NewJoke::new("Dad", "Why don't eggs tell jokes?", "They'd crack up").unwrap(),
    NewJoke::new("Puns", "I'm on a seafood diet", "I see food and I eat it").unwrap(),
  ]
}

fn memory_store() -> Arc<MemoryStore> {
  Arc::new(MemoryStore::with_jokes(seed()).unwrap())
}

fn app<S: JokeStore + 'static>(store: &Arc<S>) -> Router {
  Router::new().nest("/jokebook", api_router(store.clone()))
}

async fn send(router: Router, req: Request<Body>) -> Response {
  router.oneshot(req).await.unwrap()
}

async fn get(router: Router, uri: &str) -> Response {
  send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_form(router: Router, body: &str) -> Response {
  let req = Request::post("/jokebook/joke/add")
    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
    .body(Body::from(body.to_owned()))
    .unwrap();
  send(router, req).await
}

async fn body_bytes(resp: Response) -> Vec<u8> {
  axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap()
    .to_vec()
}

async fn body_text(resp: Response) -> String {
  String::from_utf8(body_bytes(resp).await).unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(resp: Response) -> T {
  serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

/// A store whose every call fails, for exercising the 500 path.
struct BrokenStore;

#[derive(Debug, thiserror::Error)]
#[error("connection refused: secret-host:5432")]
struct BrokenError;

impl JokeStore for BrokenStore {
  type Error = BrokenError;

  async fn list_categories(&self) -> Result<Vec<CategoryRecord>, BrokenError> {
    Err(BrokenError)
  }

  async fn list_by_category(
    &self,
    _category: &str,
    _limit: Option<NonZeroU32>,
  ) -> Result<Vec<Joke>, BrokenError> {
    Err(BrokenError)
  }

  async fn pick_random(&self) -> Result<Option<Joke>, BrokenError> {
    Err(BrokenError)
  }

  async fn insert(&self, _joke: &NewJoke) -> Result<Joke, BrokenError> {
    Err(BrokenError)
  }
}

// ─── Categories ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn categories_are_sorted_and_distinct() {
  let store = memory_store();
  let resp = get(app(&store), "/jokebook/categories").await;
  assert_eq!(resp.status(), StatusCode::OK);

  let cats: Vec<CategoryRecord> = body_json(resp).await;
  let names: Vec<&str> = cats.iter().map(|c| c.category.as_str()).collect();
  assert_eq!(names, ["Dad", "Puns"]);
}

// ─── By category ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn category_returns_only_matching_rows() {
  let store = memory_store();
  let resp = get(app(&store), "/jokebook/category/Puns").await;
  assert_eq!(resp.status(), StatusCode::OK);

  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes.len(), 3);
  assert!(jokes.iter().all(|j| j.category == "Puns"));
}

#[tokio::test]
async fn category_match_is_case_sensitive() {
  let store = memory_store();
  let resp = get(app(&store), "/jokebook/category/puns").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_category_is_400_not_empty_list() {
  let store = memory_store();
  let resp = get(app(&store), "/jokebook/category/Nonexistent").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(
    body_text(resp).await,
    "Invalid category. Please try a valid category."
  );
}

#[tokio::test]
async fn empty_category_segment_is_400() {
  let store = memory_store();
  let resp = get(app(&store), "/jokebook/category/").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(body_text(resp).await, "Invalid category parameter");
}

#[tokio::test]
async fn percent_encoded_category_is_decoded() {
  let store = Arc::new(
    MemoryStore::with_jokes([NewJoke::new("Knock Knock", "Who's there?", "Lettuce").unwrap()])
      .unwrap(),
  );
  let resp = get(app(&store), "/jokebook/category/Knock%20Knock").await;
  assert_eq!(resp.status(), StatusCode::OK);
  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes[0].delivery, "Lettuce");
}

#[tokio::test]
async fn limit_caps_rows() {
  let store = memory_store();
  let resp = get(app(&store), "/jokebook/category/Puns?limit=2").await;
  assert_eq!(resp.status(), StatusCode::OK);
  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes.len(), 2);
}

#[tokio::test]
async fn empty_limit_means_no_limit() {
  let store = memory_store();
  let resp = get(app(&store), "/jokebook/category/Puns?limit=").await;
  assert_eq!(resp.status(), StatusCode::OK);
  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes.len(), 3);
}

#[tokio::test]
async fn invalid_limits_are_400() {
  let store = memory_store();
  for q in ["0", "-1", "abc", "1.5"] {
    let resp = get(app(&store), &format!("/jokebook/category/Puns?limit={q}")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "limit={q}");
    assert_eq!(body_text(resp).await, "Invalid limit parameter");
  }
}

#[test]
fn parse_limit_values() {
  assert_eq!(parse_limit(None).unwrap(), None);
  assert_eq!(parse_limit(Some("")).unwrap(), None);
  assert_eq!(parse_limit(Some(" 3 ")).unwrap(), NonZeroU32::new(3));
  assert!(parse_limit(Some("0")).is_err());
}

// ─── Random ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn random_returns_a_well_formed_joke() {
  let store = memory_store();
  let resp = get(app(&store), "/jokebook/random").await;
  assert_eq!(resp.status(), StatusCode::OK);

  let v: serde_json::Value = body_json(resp).await;
  let obj = v.as_object().expect("joke object");
  assert_eq!(obj.len(), 4);
  assert!(obj["id"].is_i64());
  for field in ["category", "setup", "delivery"] {
    assert!(!obj[field].as_str().unwrap().is_empty(), "{field} empty");
  }
}

#[tokio::test]
async fn random_on_empty_store_is_204() {
  let store = Arc::new(MemoryStore::new());
  let resp = get(app(&store), "/jokebook/random").await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  assert!(body_bytes(resp).await.is_empty());
}

// ─── Add ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_returns_updated_category_list() {
  let store = memory_store();
  let before = store.list_by_category("Puns", None).await.unwrap().len();

  let resp = post_form(
    app(&store),
    "category=Puns&setup=Why+did...&delivery=Because...",
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);

  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes.len(), before + 1);
  assert!(jokes.iter().all(|j| j.category == "Puns"));
  let added = NewJoke::new("Puns", "Why did...", "Because...").unwrap();
  assert_eq!(jokes.iter().filter(|j| j.matches(&added)).count(), 1);

  let resp = get(app(&store), "/jokebook/category/Puns").await;
  let listed: Vec<Joke> = body_json(resp).await;
  assert!(listed.iter().any(|j| j.matches(&added)));
}

#[tokio::test]
async fn add_new_category_surfaces_in_categories() {
  let store = memory_store();
  let resp = post_form(app(&store), "category=Animals&setup=s&delivery=d").await;
  assert_eq!(resp.status(), StatusCode::OK);
  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes.len(), 1);

  let resp = get(app(&store), "/jokebook/categories").await;
  let cats: Vec<CategoryRecord> = body_json(resp).await;
  assert_eq!(cats.first().map(|c| c.category.as_str()), Some("Animals"));
}

#[tokio::test]
async fn add_accepts_json_body() {
  let store = memory_store();
  let body = serde_json::json!({
    "category": "Dad",
    "setup": "I'm afraid for the calendar",
    "delivery": "Its days are numbered",
  });
  let req = Request::post("/jokebook/joke/add")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap();
  let resp = send(app(&store), req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes.len(), 3);
}

fn multipart(fields: &[(&str, &str)]) -> Request<Body> {
  let mut body = String::new();
  for (name, value) in fields {
    body.push_str(&format!(
      "--XBOUNDARY\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
    ));
  }
  body.push_str("--XBOUNDARY--\r\n");
  Request::post("/jokebook/joke/add")
    .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
    .body(Body::from(body))
    .unwrap()
}

#[tokio::test]
async fn add_accepts_multipart_body() {
  let store = memory_store();
  let req = multipart(&[
    ("category", "Puns"),
    ("setup", "I did a theatrical performance about puns"),
    ("delivery", "It was a play on words"),
  ]);
  let resp = send(app(&store), req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes.len(), 4);
  assert!(jokes.iter().any(|j| j.delivery == "It was a play on words"));
}

#[tokio::test]
async fn multipart_with_missing_or_empty_field_is_400() {
  let store = memory_store();
  let before = store.len();

  for fields in [
    &[("setup", "s"), ("delivery", "d")][..],
    &[("category", "Puns"), ("setup", ""), ("delivery", "d")][..],
    &[][..],
  ] {
    let resp = send(app(&store), multipart(fields)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "fields: {fields:?}");
    assert_eq!(body_text(resp).await, "Missing required parameters");
  }
  assert_eq!(store.len(), before);
}

#[tokio::test]
async fn add_with_missing_or_empty_field_is_400_and_inserts_nothing() {
  let store = memory_store();
  let before = store.len();

  for body in [
    "setup=s&delivery=d",
    "category=Puns&delivery=d",
    "category=Puns&setup=s",
    "category=&setup=s&delivery=d",
    "category=Puns&setup=&delivery=d",
    "category=Puns&setup=s&delivery=",
    "",
  ] {
    let resp = post_form(app(&store), body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {body:?}");
    assert_eq!(body_text(resp).await, "Missing required parameters");
  }
  assert_eq!(store.len(), before);
}

#[tokio::test]
async fn add_with_malformed_json_is_400() {
  let store = memory_store();
  let req = Request::post("/jokebook/joke/add")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = send(app(&store), req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(store.len(), seed().len());
}

// ─── Store failures ──────────────────────────────────────────────────────────

#[tokio::test]
async fn store_errors_are_generic_500s() {
  let store = Arc::new(BrokenStore);

  for uri in [
    "/jokebook/categories",
    "/jokebook/category/Puns",
    "/jokebook/random",
  ] {
    let resp = get(app(&store), uri).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
    let text = body_text(resp).await;
    assert_eq!(text, "Server error");
  }

  let resp = post_form(app(&store), "category=a&setup=b&delivery=c").await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  assert!(!body_text(resp).await.contains("secret-host"));
}

#[tokio::test]
async fn validation_runs_before_store_access() {
  // A broken store still yields 400 for a bad request.
  let store = Arc::new(BrokenStore);
  let resp = post_form(app(&store), "category=a").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let resp = get(app(&store), "/jokebook/category/Puns?limit=0").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ─── Against SQLite ──────────────────────────────────────────────────────────

#[tokio::test]
async fn sqlite_backed_add_then_list() {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());

  let resp = get(app(&store), "/jokebook/random").await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let resp = post_form(app(&store), "category=Puns&setup=Why+did...&delivery=Because...").await;
  assert_eq!(resp.status(), StatusCode::OK);
  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes.len(), 1);
  assert!(jokes[0].id > 0);

  let resp = post_form(app(&store), "category=Puns&setup=Again&delivery=Still").await;
  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes.len(), 2);
  assert_eq!(store.count().await.unwrap(), 2);

  let resp = get(app(&store), "/jokebook/category/Puns?limit=1").await;
  let jokes: Vec<Joke> = body_json(resp).await;
  assert_eq!(jokes.len(), 1);

  let resp = get(app(&store), "/jokebook/random").await;
  assert_eq!(resp.status(), StatusCode::OK);
}
