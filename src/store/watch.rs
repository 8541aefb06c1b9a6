//! Content directory watcher.
//!
//! Watches a content directory and rebuilds the store snapshot when
//! documents change. Consumers receive each rebuilt snapshot as an
//! `Arc<Store>` and swap their pointer; the snapshot itself is never
//! mutated in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use thiserror::Error;
use tokio::sync::mpsc;

use super::source::{ContentSource, DirSource};
use super::Store;

/// Errors that can occur with the watcher
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("Watch directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

/// Configuration for the corpus watcher
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Content directory to watch
    pub watch_path: PathBuf,

    /// Debounce window for bursts of file events (seconds)
    pub debounce_secs: u64,
}

impl WatcherConfig {
    pub fn new(watch_path: impl Into<PathBuf>) -> Self {
        Self {
            watch_path: watch_path.into(),
            debounce_secs: 2,
        }
    }

    /// Check that the watch path exists
    pub fn validate(&self) -> Result<(), WatcherError> {
        if !self.watch_path.is_dir() {
            return Err(WatcherError::DirectoryNotFound(self.watch_path.clone()));
        }
        Ok(())
    }
}

/// Watches a content directory and emits rebuilt store snapshots
pub struct CorpusWatcher {
    config: WatcherConfig,
}

impl CorpusWatcher {
    /// Create a watcher for a content directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            config: WatcherConfig::new(dir),
        }
    }

    /// Create a watcher with custom configuration
    pub fn with_config(config: WatcherConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    /// Start watching. The initial snapshot is sent immediately; a new
    /// snapshot follows each debounced batch of content changes.
    ///
    /// Runs until stopped via the returned handle.
    pub async fn watch(&self) -> Result<(mpsc::Receiver<Arc<Store>>, WatchHandle)> {
        self.config.validate()?;

        let (snapshot_tx, snapshot_rx) = mpsc::channel::<Arc<Store>>(16);
        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);

        let config = self.config.clone();

        let handle = tokio::spawn(async move {
            if let Err(e) = run_watcher(config, snapshot_tx, &mut stop_rx).await {
                tracing::error!("Corpus watcher error: {}", e);
            }
        });

        Ok((
            snapshot_rx,
            WatchHandle {
                stop_tx,
                task: handle,
            },
        ))
    }
}

/// Handle to control the watcher
pub struct WatchHandle {
    stop_tx: mpsc::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

impl WatchHandle {
    /// Stop the watcher
    pub async fn stop(self) -> Result<()> {
        let _ = self.stop_tx.send(()).await;
        self.task.await?;
        Ok(())
    }
}

/// Whether a changed path is a content document we care about
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ext.eq_ignore_ascii_case("json")
                || ext.eq_ignore_ascii_case("yaml")
                || ext.eq_ignore_ascii_case("yml")
        })
        .unwrap_or(false)
}

/// Internal watcher loop
async fn run_watcher(
    config: WatcherConfig,
    snapshot_tx: mpsc::Sender<Arc<Store>>,
    stop_rx: &mut mpsc::Receiver<()>,
) -> Result<()> {
    let source = DirSource::new(&config.watch_path);

    // Initial snapshot so consumers start with the current corpus
    match Store::from_source(&source).await {
        Ok(store) => {
            let _ = snapshot_tx.send(Arc::new(store)).await;
        }
        Err(e) => {
            tracing::warn!("Initial corpus load failed: {:#}", e);
        }
    }

    // Bridge debouncer callbacks (delivered on notify's thread) into the
    // async loop without blocking the runtime
    let (event_tx, mut event_rx) = mpsc::channel::<DebounceEventResult>(16);
    let mut debouncer = new_debouncer(
        Duration::from_secs(config.debounce_secs),
        move |result: DebounceEventResult| {
            let _ = event_tx.blocking_send(result);
        },
    )?;
    debouncer
        .watcher()
        .watch(&config.watch_path, RecursiveMode::Recursive)?;

    tracing::info!("Watching {} for content changes", config.watch_path.display());

    loop {
        tokio::select! {
            _ = stop_rx.recv() => {
                tracing::info!("Corpus watcher stopping...");
                break;
            }
            result = event_rx.recv() => {
                let Some(result) = result else {
                    tracing::error!("Watcher channel disconnected");
                    break;
                };

                match result {
                    Ok(events) => {
                        if !events.iter().any(|e| is_content_file(&e.path)) {
                            continue;
                        }

                        match Store::from_source(&source).await {
                            Ok(store) => {
                                tracing::info!("Corpus rebuilt: {} records", store.len());
                                if snapshot_tx.send(Arc::new(store)).await.is_err() {
                                    // Receiver gone, no one left to serve
                                    break;
                                }
                            }
                            Err(e) => {
                                // Keep serving the previous snapshot
                                tracing::warn!("Corpus rebuild failed: {:#}", e);
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Watcher error: {:?}", e);
                    }
                }
            }
        }
    }

    Ok(())
}
