//! Async HTTP client wrapping the jokebook JSON API.
//!
//! Each call returns structured data; a non-success status is an error.

use std::{num::NonZeroU32, time::Duration};

use anyhow::{Context, Result, anyhow};
use jokebook_core::{CategoryRecord, Joke, NewJoke};
use reqwest::{Client, Response, StatusCode, Url};

use crate::view::Region;

/// Connection settings for the jokebook API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:3000".to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// One API operation, as dispatched by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  Random,
  Categories,
  Category {
    category: String,
    limit:    Option<NonZeroU32>,
  },
  Add(NewJoke),
}

impl Call {
  /// The region whose contents this call's result replaces.
  pub fn region(&self) -> Region {
    match self {
      Call::Random => Region::RandomJoke,
      Call::Categories => Region::Categories,
      Call::Category { .. } => Region::SearchResults,
      Call::Add(_) => Region::AddResult,
    }
  }
}

/// The successful result of a [`Call`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// `None` when the jokebook is empty.
  Random(Option<Joke>),
  Categories(Vec<CategoryRecord>),
  Jokes(Vec<Joke>),
  /// The category's jokes after a successful add.
  Added(Vec<Joke>),
}

/// Async HTTP client for the jokebook API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  base:   Url,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("failed to build HTTP client")?;
    let base = Url::parse(&config.base_url)
      .with_context(|| format!("invalid base URL {:?}", config.base_url))?;
    if base.cannot_be_a_base() {
      return Err(anyhow!("invalid base URL {:?}", config.base_url));
    }
    Ok(Self { client, base })
  }

  /// `<base>/jokebook/<segments...>`, each segment percent-encoded.
  pub fn endpoint(&self, segments: &[&str]) -> Url {
    let mut url = self.base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().push("jokebook").extend(segments);
    }
    url
  }

  /// Run `call` and wrap its result as an [`Outcome`].
  pub async fn execute(&self, call: Call) -> Result<Outcome> {
    match call {
      Call::Random => self.random().await.map(Outcome::Random),
      Call::Categories => self.categories().await.map(Outcome::Categories),
      Call::Category { category, limit } => {
        self.jokes_in(&category, limit).await.map(Outcome::Jokes)
      }
      Call::Add(joke) => self.add(&joke).await.map(Outcome::Added),
    }
  }

  /// `GET /jokebook/categories`
  pub async fn categories(&self) -> Result<Vec<CategoryRecord>> {
    let resp = self
      .client
      .get(self.endpoint(&["categories"]))
      .send()
      .await
      .context("GET /categories failed")?;

    check_status(resp, "GET /categories")
      .await?
      .json()
      .await
      .context("deserialising categories")
  }

  /// `GET /jokebook/category/<category>[?limit=N]`
  pub async fn jokes_in(
    &self,
    category: &str,
    limit: Option<NonZeroU32>,
  ) -> Result<Vec<Joke>> {
    let mut req = self.client.get(self.endpoint(&["category", category]));
    if let Some(limit) = limit {
      req = req.query(&[("limit", limit.get())]);
    }
    let resp = req.send().await.context("GET /category failed")?;

    check_status(resp, "GET /category")
      .await?
      .json()
      .await
      .context("deserialising jokes")
  }

  /// `GET /jokebook/random`: `None` on 204 No Content.
  pub async fn random(&self) -> Result<Option<Joke>> {
    let resp = self
      .client
      .get(self.endpoint(&["random"]))
      .send()
      .await
      .context("GET /random failed")?;

    if resp.status() == StatusCode::NO_CONTENT {
      return Ok(None);
    }
    check_status(resp, "GET /random")
      .await?
      .json()
      .await
      .map(Some)
      .context("deserialising joke")
  }

  /// `POST /jokebook/joke/add` (form-encoded)
  pub async fn add(&self, joke: &NewJoke) -> Result<Vec<Joke>> {
    let resp = self
      .client
      .post(self.endpoint(&["joke", "add"]))
      .form(&[
        ("category", joke.category.as_str()),
        ("setup", joke.setup.as_str()),
        ("delivery", joke.delivery.as_str()),
      ])
      .send()
      .await
      .context("POST /joke/add failed")?;

    check_status(resp, "POST /joke/add")
      .await?
      .json()
      .await
      .context("deserialising jokes")
  }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check_status(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.text().await.unwrap_or_default();
  if body.is_empty() {
    Err(anyhow!("{what} → {status}"))
  } else {
    Err(anyhow!("{what} → {status}: {body}"))
  }
}
