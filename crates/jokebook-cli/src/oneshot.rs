//! Non-interactive subcommands: run one call, print it, exit.

use std::num::NonZeroU32;

use anyhow::{Result, anyhow};
use clap::Subcommand;

use crate::{
  client::{ApiClient, Call},
  view,
};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// Print one random joke.
  Random,
  /// List all categories.
  Categories,
  /// Print the jokes in a category.
  Category {
    name:  String,
    /// Print at most this many jokes.
    #[arg(short, long)]
    limit: Option<NonZeroU32>,
  },
  /// Add a joke and print its category.
  Add {
    #[arg(long)]
    category: String,
    #[arg(long)]
    setup:    String,
    #[arg(long)]
    delivery: String,
  },
}

impl Command {
  /// Validate input the same way the TUI does and build the call.
  pub fn into_call(self) -> Result<Call> {
    Ok(match self {
      Command::Random => Call::Random,
      Command::Categories => Call::Categories,
      Command::Category { name, limit } => Call::Category {
        category: view::validate_search(&name).map_err(|m| anyhow!(m))?.to_owned(),
        limit,
      },
      Command::Add { category, setup, delivery } => Call::Add(
        view::validate_new_joke(&category, &setup, &delivery).map_err(|m| anyhow!(m))?,
      ),
    })
  }
}

pub async fn run(client: &ApiClient, command: Command) -> Result<()> {
  let call = command.into_call()?;
  let region = call.region();

  match client.execute(call).await {
    Ok(outcome) => {
      print!("{}", view::to_plain_text(&view::outcome(&outcome)));
      Ok(())
    }
    Err(e) => {
      tracing::warn!(region = ?region, error = %format!("{e:#}"), "request failed");
      eprint!("{}", view::to_plain_text(&view::failure(region)));
      Err(e)
    }
  }
}
