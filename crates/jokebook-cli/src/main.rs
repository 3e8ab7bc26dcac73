//! `jokebook`: terminal client for the jokebook server.
//!
//! # Usage
//!
//! ```text
//! jokebook --url http://localhost:3000             # interactive UI
//! jokebook --config ~/.config/jokebook/client.toml
//! jokebook random
//! jokebook category Puns --limit 3
//! jokebook add --category Puns --setup "..." --delivery "..."
//! ```

mod app;
mod client;
mod oneshot;
mod sequence;
mod ui;
mod view;

use std::{io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::{App, Pending, Reply};
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "jokebook", about = "Terminal client for the jokebook server")]
struct Args {
  /// Path to a TOML config file (url, timeout_secs, log_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the jokebook server (default: http://localhost:3000).
  #[arg(long, env = "JOKEBOOK_URL")]
  url: Option<String>,

  /// Request timeout in seconds (default: 30).
  #[arg(long)]
  timeout: Option<u64>,

  /// Write logs to this file while the interactive UI is running
  /// (default: `jokebook.log` in the system temp directory).
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<oneshot::Command>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          String,
  timeout_secs: Option<u64>,
  log_file:     Option<PathBuf>,
}

fn env_filter(default: LevelFilter) -> EnvFilter {
  EnvFilter::builder()
    .with_default_directive(default.into())
    .from_env_lossy()
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let defaults = ApiConfig::default();
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or(defaults.base_url),
    timeout:  args
      .timeout
      .or(file_cfg.timeout_secs)
      .map(Duration::from_secs)
      .unwrap_or(defaults.timeout),
  };
  let log_file = log_path(args.log_file, file_cfg.log_file);

  let client = ApiClient::new(api_config)?;

  if let Some(command) = args.command {
    tracing_subscriber::fmt()
      .with_env_filter(env_filter(LevelFilter::WARN))
      .with_writer(io::stderr)
      .init();
    return oneshot::run(&client, command).await;
  }

  // The terminal belongs to the UI, so logs only go to a file.
  let file = std::fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(&log_file)
    .with_context(|| format!("opening log file {}", log_file.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(env_filter(LevelFilter::INFO))
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();

  let mut app = App::new();

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app, client).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

/// Where the interactive UI writes its logs: flag, then config file, then
/// `jokebook.log` in the temp directory.
fn log_path(flag: Option<PathBuf>, file: Option<PathBuf>) -> PathBuf {
  flag
    .or(file)
    .unwrap_or_else(|| std::env::temp_dir().join("jokebook.log"))
}

// ─── Event loop ───────────────────────────────────────────────────────────────

/// Run every queued call on its own task; each reports back through `tx`.
fn spawn_pending(app: &mut App, client: &ApiClient, tx: &mpsc::UnboundedSender<Reply>) {
  for Pending { region, ticket, call } in app.take_outbox() {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
      tracing::debug!(?region, ticket, ?call, "dispatching");
      let result = client.execute(call).await.map_err(|e| format!("{e:#}"));
      // The receiver only goes away once the UI has exited.
      let _ = tx.send(Reply { region, ticket, result });
    });
  }
}

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  client: ApiClient,
) -> Result<()> {
  let (tx, mut rx) = mpsc::unbounded_channel();
  app.start();

  loop {
    spawn_pending(app, &client, &tx);
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key)
    {
      break;
    }

    while let Ok(reply) = rx.try_recv() {
      app.apply(reply);
    }
  }

  Ok(())
}
