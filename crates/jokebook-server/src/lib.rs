//! HTTP server assembly for the jokebook.
//!
//! Mounts [`jokebook_api::api_router`] under `/jokebook`, adds request
//! tracing, and optionally serves a directory of static files at `/`.

pub mod signal;

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use jokebook_core::store::JokeStore;
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `JOKEBOOK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Directory served at `/`, e.g. a page that calls the API.
  #[serde(default)]
  pub static_dir: Option<PathBuf>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("jokebook.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      store_path: default_store_path(),
      static_dir: None,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router around `store`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: JokeStore + 'static,
{
  let app = Router::new().nest("/jokebook", jokebook_api::api_router(store));

  let app = match &config.static_dir {
    Some(dir) => app.fallback_service(ServeDir::new(dir)),
    None => app,
  };

  app.layer(TraceLayer::new_for_http())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
