//! `replaydex` command line entry point.
mod commands;
mod config;
mod loader;

use anyhow::Result;
use clap::Parser;
use config::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.loader_config();

    let output = match &cli.command {
        Command::Match(args) => commands::run_match(args, config).await?,
        Command::Batch(args) => commands::run_batch(args, config).await?,
    };

    let rendered = if cli.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{rendered}");
    Ok(())
}
