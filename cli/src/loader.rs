//! Concurrent replay file loading

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use replaydex_replay::ReplayDocument;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

const REPLAY_EXTENSIONS: &[&str] = &["json", "html", "htm", "log", "txt"];

#[derive(Debug, Clone, Copy)]
pub struct LoaderConfig {
    pub concurrency: usize,
    /// Per file
    pub timeout: Duration,
}

/// Documents that loaded, in path order, plus how many did not
#[derive(Debug, Default)]
pub struct LoadedBatch {
    pub documents: Vec<ReplayDocument>,
    pub failures: u32,
}

/// Read and parse one replay file
pub async fn load_document(path: &Path) -> Result<ReplayDocument> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut document = ReplayDocument::parse(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if document.id.is_empty()
        && let Some(stem) = path.file_stem()
    {
        document.id = stem.to_string_lossy().into_owned();
    }
    Ok(document)
}

/// Expand directories into the replay files beneath them, sorted
pub async fn collect_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending: Vec<PathBuf> = inputs.to_vec();

    while let Some(path) = pending.pop() {
        let metadata = tokio::fs::metadata(&path)
            .await
            .with_context(|| format!("Cannot access {}", path.display()))?;

        if !metadata.is_dir() {
            files.push(path);
            continue;
        }

        let mut entries = tokio::fs::read_dir(&path)
            .await
            .with_context(|| format!("Failed to list {}", path.display()))?;
        while let Some(entry) = entries.next_entry().await? {
            let entry_path = entry.path();
            if entry.file_type().await?.is_dir() {
                pending.push(entry_path);
            } else if has_replay_extension(&entry_path) {
                files.push(entry_path);
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn has_replay_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| REPLAY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Load every file with at most `concurrency` reads in flight. Unreadable or
/// timed out files are logged and counted, never fatal.
pub async fn load_documents(paths: Vec<PathBuf>, config: LoaderConfig) -> Result<LoadedBatch> {
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let timeout = config.timeout;
        tasks.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => tokio::time::timeout(timeout, load_document(&path))
                    .await
                    .unwrap_or_else(|_| Err(anyhow!("Timed out reading {}", path.display()))),
                Err(e) => Err(e.into()),
            };
            (index, path, result)
        });
    }

    let mut loaded = Vec::new();
    let mut failures = 0;
    while let Some(joined) = tasks.join_next().await {
        let (index, path, result) = joined.context("Loader task panicked")?;
        match result {
            Ok(document) => {
                debug!(path = %path.display(), "loaded replay");
                loaded.push((index, document));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{e:#}"), "skipping replay");
                failures += 1;
            }
        }
    }

    loaded.sort_by_key(|(index, _)| *index);
    Ok(LoadedBatch {
        documents: loaded.into_iter().map(|(_, document)| document).collect(),
        failures,
    })
}
