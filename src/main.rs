// This is the primary entry point for the minimate CLI.
// The lib.rs file serves only as a public API for external consumers.

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use minimate::cli::{Cli, Command};
use minimate::commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "minimate=info".into()),
        )
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_target(false)       // Remove module path
        .with_writer(std::io::stderr)
        .compact();               // Use compact formatter instead of pretty

    subscriber.init();

    let cli = Cli::parse();
    debug!("parsed command: {:?}", cli.command);

    match cli.command {
        Command::Optimize(opts) => commands::optimize::run(opts)
            .await
            .context("optimize failed")?,
        Command::Bench(opts) => commands::bench::run(opts)
            .await
            .context("benchmark failed")?,
    }

    Ok(())
}
