//! File system watcher for watch mode.
//!
//! Watches the project directory itself (non-recursively, for the config
//! file, `package.json` and `.env`) and the source directory recursively.
//! Events inside output directories are dropped so a build never triggers
//! itself.

use crate::build::TRANSIENT_TSCONFIG;
use crate::config::CONFIG_FILE_NAME;
use crate::env::ENV_FILE_NAME;
use crate::error::{CliError, Result};
use crate::watch::WatchEvent;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Project manifest whose changes trigger a rebuild.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Files directly in the project directory that trigger a rebuild.
const ROOT_FILES: &[&str] = &[CONFIG_FILE_NAME, MANIFEST_FILE_NAME, ENV_FILE_NAME];

/// Decides which changed paths are worth a rebuild.
#[derive(Debug, Clone)]
pub struct WatchFilter {
    cwd: PathBuf,
    source_root: PathBuf,
    ignored: Arc<RwLock<Vec<PathBuf>>>,
}

impl WatchFilter {
    pub fn new(cwd: impl Into<PathBuf>, source_root: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            source_root: source_root.into(),
            ignored: Arc::default(),
        }
    }

    /// Replace the set of output directories whose contents are ignored.
    ///
    /// Directories that contain the source root are never ignored, otherwise
    /// an `outDir` of `.` would silence every change.
    pub fn set_output_dirs(&self, dirs: impl IntoIterator<Item = PathBuf>) {
        let dirs = dirs
            .into_iter()
            .filter(|dir| !self.source_root.starts_with(dir))
            .collect();
        *self.ignored.write() = dirs;
    }

    pub fn accepts(&self, path: &Path) -> bool {
        if self.ignored.read().iter().any(|dir| path.starts_with(dir)) {
            return false;
        }

        if let Ok(relative) = path.strip_prefix(&self.source_root) {
            // Editor swap files and hidden directories
            return !relative.components().any(|c| {
                c.as_os_str()
                    .to_str()
                    .is_some_and(|name| name.starts_with('.'))
            });
        }

        if path.parent() == Some(self.cwd.as_path()) {
            let name = path.file_name().and_then(|n| n.to_str());
            return name.is_some_and(|n| n != TRANSIENT_TSCONFIG && ROOT_FILES.contains(&n));
        }

        false
    }
}

/// Active watches; dropping this stops watching.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    filter: WatchFilter,
}

impl FileWatcher {
    /// Start watching and forward accepted changes to `tx`.
    ///
    /// The source directory is only watched if it exists.
    pub fn new(filter: WatchFilter, tx: mpsc::Sender<WatchEvent>) -> Result<Self> {
        let handler_filter = filter.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Watch error: {}", e);
                    return;
                }
            };

            if !matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                return;
            }

            for path in event.paths {
                if handler_filter.accepts(&path) {
                    // Receiver gone means watch mode is shutting down.
                    let _ = tx.blocking_send(WatchEvent::Changed(path));
                }
            }
        })
        .map_err(CliError::Watch)?;

        watcher
            .watch(&filter.cwd, RecursiveMode::NonRecursive)
            .map_err(CliError::Watch)?;
        tracing::debug!("Watching {}", filter.cwd.display());

        if filter.source_root.is_dir() {
            watcher
                .watch(&filter.source_root, RecursiveMode::Recursive)
                .map_err(CliError::Watch)?;
            tracing::debug!("Watching {} (recursive)", filter.source_root.display());
        }

        Ok(Self {
            _watcher: watcher,
            filter,
        })
    }

    pub fn filter(&self) -> &WatchFilter {
        &self.filter
    }
}
