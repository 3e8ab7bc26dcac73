//! Shutdown signal handling.

use std::error::Error;

use tokio::signal::ctrl_c;

/// Resolves once the OS asks the process to stop (SIGINT, or SIGTERM on unix).
pub async fn shutdown() {
  tokio::select! {
    result = ctrl_c() => match result {
      Ok(()) => tracing::info!("received SIGINT, shutting down"),
      Err(err) => {
        tracing::error!(error = &err as &dyn Error, "failed listening for SIGINT");
        std::future::pending::<()>().await
      }
    },
    () = terminate() => {},
  }
}

#[cfg(unix)]
async fn terminate() {
  use tokio::signal::unix::{SignalKind, signal};

  match signal(SignalKind::terminate()) {
    Ok(mut sig) => {
      if sig.recv().await.is_some() {
        tracing::info!("received SIGTERM, shutting down");
      }
    }
    Err(err) => {
      tracing::error!(error = &err as &dyn Error, "failed listening for SIGTERM");
      std::future::pending::<()>().await
    }
  }
}

#[cfg(not(unix))]
async fn terminate() { std::future::pending().await }
