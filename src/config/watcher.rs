//! Source file watcher for hot reload.
//!
//! Parent directories are watched rather than the files themselves, so a save
//! that writes a temp file and renames it over the source keeps triggering
//! reloads. Events for unrelated files in those directories are dropped.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::store::ConfigStore;

/// Outcome of a reload triggered by a file change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadEvent {
    /// The store now reflects the files on disk.
    Reloaded,
    /// The reload failed; the store kept its previous contents.
    Failed(String),
}

/// A watcher that reloads a store whenever one of its sources changes.
pub struct SourceWatcher {
    store: Arc<ConfigStore>,
    event_tx: mpsc::UnboundedSender<ReloadEvent>,
}

impl SourceWatcher {
    /// Create a new SourceWatcher.
    ///
    /// Returns the watcher and a receiver for reload outcomes.
    pub fn new(store: Arc<ConfigStore>) -> (Self, mpsc::UnboundedReceiver<ReloadEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        (Self { store, event_tx }, event_rx)
    }

    /// Start watching the directories of every recorded source path in a
    /// background thread.
    ///
    /// The returned handle must be kept alive for as long as watching should
    /// continue.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let sources: Vec<PathBuf> = self
            .store
            .source_paths()
            .iter()
            .map(|path| normalize(path))
            .collect();
        let dirs: BTreeSet<PathBuf> = sources
            .iter()
            .map(|path| parent_dir(path).to_path_buf())
            .collect();
        let store = self.store;
        let tx = self.event_tx;
        let watched = sources.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => handle_event(&store, &watched, &event, &tx),
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        for dir in &dirs {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
        }

        tracing::info!(sources = ?sources, dirs = ?dirs, "Source watcher started");
        Ok(watcher)
    }
}

/// Reload on modify/create events touching one of `sources` and report the
/// outcome.
fn handle_event(
    store: &ConfigStore,
    sources: &[PathBuf],
    event: &Event,
    tx: &mpsc::UnboundedSender<ReloadEvent>,
) {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return;
    }
    if !event
        .paths
        .iter()
        .any(|path| sources.contains(&normalize(path)))
    {
        return;
    }

    tracing::info!(paths = ?event.paths, "Source change detected, reloading...");
    let outcome = match store.reload() {
        Ok(()) => ReloadEvent::Reloaded,
        Err(e) => {
            tracing::error!("Failed to reload: {}. Keeping current configuration.", e);
            ReloadEvent::Failed(e.to_string())
        }
    };
    let _ = tx.send(outcome);
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Resolve the directory part of `path` so watcher events and configured
/// paths compare equal. The file itself may not exist.
fn normalize(path: &Path) -> PathBuf {
    let Some(name) = path.file_name() else {
        return path.to_path_buf();
    };
    match parent_dir(path).canonicalize() {
        Ok(dir) => dir.join(name),
        Err(_) => path.to_path_buf(),
    }
}
