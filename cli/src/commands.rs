//! Subcommand implementations

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use replaydex_replay::{BatchSummary, analyze_documents};

use crate::config::{BatchArgs, MatchArgs};
use crate::loader::{LoaderConfig, collect_paths, load_document, load_documents};

pub async fn run_match(args: &MatchArgs, config: LoaderConfig) -> Result<Value> {
    let document = tokio::time::timeout(config.timeout, load_document(&args.file))
        .await
        .with_context(|| format!("Timed out reading {}", args.file.display()))??;

    let report = document
        .analyze()
        .with_context(|| format!("Failed to analyze {}", args.file.display()))?;

    info!(
        turns = report.turns,
        knockouts = report.knockouts.len(),
        "match analyzed"
    );
    Ok(serde_json::to_value(&report)?)
}

pub async fn run_batch(args: &BatchArgs, config: LoaderConfig) -> Result<Value> {
    let paths = collect_paths(&args.paths).await?;
    info!(files = paths.len(), "loading replays");

    let loaded = load_documents(paths, config).await?;
    let options = args.aggregate_options();
    let documents = loaded.documents;

    let mut summary: BatchSummary =
        tokio::task::spawn_blocking(move || analyze_documents(&documents, options))
            .await
            .context("Batch analysis panicked")?;
    summary.record_failures(loaded.failures);

    info!(
        analyzed = summary.matches_analyzed,
        failed = summary.matches_failed,
        species = summary.species.len(),
        "batch complete"
    );
    Ok(serde_json::to_value(&summary)?)
}
