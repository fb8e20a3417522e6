//! Binary crate for the `travel` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive provider configuration
//! - Human-friendly and JSON output
//! - Logging setup

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use travel_core::Config;

mod cli;
mod output;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Logs go to stderr; stdout carries command output only.
fn init_tracing(config: Option<&Config>) {
    let level = config.and_then(|c| c.log_level.as_deref()).unwrap_or(DEFAULT_LOG_LEVEL);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    let loaded = Config::load();
    init_tracing(loaded.as_ref().ok());
    let config = cli::resolve_config(&cmd.command, loaded)?;

    tracing::debug!(command = ?cmd.command, "starting");
    cmd.run(config).await
}
