//! Command line arguments

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use replaydex_replay::AggregateOptions;

use crate::loader::LoaderConfig;

/// Damage, healing and knockout statistics from Pokemon Showdown replays
#[derive(Parser, Debug)]
#[command(name = "replaydex")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Maximum replay files read at once
    #[arg(long, global = true, env = "REPLAYDEX_CONCURRENCY", default_value_t = 16)]
    pub concurrency: usize,

    /// Seconds allowed for reading one replay file
    #[arg(long, global = true, env = "REPLAYDEX_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Single-line JSON output
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one replay and print its match report
    Match(MatchArgs),

    /// Aggregate per-species statistics over many replays
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Replay JSON, replay HTML page, or raw battle log
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Replay files, or directories searched recursively
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Keep cosmetic formes (Gastrodon-East, Vivillon-Pokeball) separate
    #[arg(long)]
    pub keep_cosmetic_formes: bool,

    /// Only count team members that were sent out
    #[arg(long)]
    pub appeared_only: bool,
}

impl Cli {
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            concurrency: self.concurrency.max(1),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl BatchArgs {
    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            collapse_cosmetic_formes: !self.keep_cosmetic_formes,
            require_appearance: self.appeared_only,
        }
    }
}
