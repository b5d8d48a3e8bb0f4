//! Watch mode: rebuild on file changes and keypresses.
//!
//! File events and the `p` key arm a [`Debouncer`]; when it goes off, a full
//! build starts. The build is polled alongside the event channel and the
//! shutdown signal, so `q`, Ctrl+C and SIGINT end the loop at once, dropping
//! the build (and killing its tools). Triggers that arrive during a build
//! keep the debouncer armed and produce exactly one follow-up build; builds
//! never overlap.

pub mod debounce;
pub mod keys;
pub mod terminal;
pub mod watcher;

pub use debounce::{Debouncer, DEBOUNCE_WINDOW};
pub use keys::{command_for, KeyCommand};
pub use terminal::TerminalGuard;
pub use watcher::{FileWatcher, WatchFilter, MANIFEST_FILE_NAME};

use crate::build::{BuildSummary, Builder};
use crate::commands::build::run_build;
use crate::config::{self, SOURCE_DIR_NAME};
use crate::env::Mode;
use crate::error::Result;
use crate::ui;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::sync::mpsc;

const EVENT_BUFFER: usize = 256;

type BuildFuture<'a> = Pin<Box<dyn Future<Output = Result<BuildSummary>> + 'a>>;

/// Input to the watch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A watched path changed
    Changed(PathBuf),
    /// The user asked for a rebuild
    RebuildRequested,
    /// The user asked to quit
    Quit,
}

/// Run watch mode with keyboard controls until the user quits.
pub async fn run(builder: &Builder, mode: Mode) -> Result<()> {
    // Captured before the key thread first switches to raw mode.
    let terminal = TerminalGuard::capture();
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);

    if keys::spawn_listener(tx.clone()).is_some() {
        ui::hint("press p to rebuild, q to quit");
    }

    let result = watch_loop(builder, mode, tx, rx, interrupted()).await;
    drop(terminal);
    result
}

/// Run watch mode until `shutdown` resolves.
///
/// Same loop as [`run`], without keyboard controls or signal handling.
pub async fn run_until(
    builder: &Builder,
    mode: Mode,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    watch_loop(builder, mode, tx, rx, shutdown).await
}

async fn watch_loop(
    builder: &Builder,
    mode: Mode,
    tx: mpsc::Sender<WatchEvent>,
    mut rx: mpsc::Receiver<WatchEvent>,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let cwd = builder.cwd().to_path_buf();

    let filter = WatchFilter::new(&cwd, cwd.join(SOURCE_DIR_NAME));
    filter.set_output_dirs(output_dirs(&cwd));
    let watcher = FileWatcher::new(filter, tx)?;

    ui::info("Watching for changes...");

    let mut debouncer = Debouncer::default();
    let mut building: Option<BuildFuture<'_>> = None;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,

            event = rx.recv() => match event {
                Some(WatchEvent::Changed(path)) => {
                    tracing::debug!("Changed: {}", path.display());
                    debouncer.trigger();
                }
                Some(WatchEvent::RebuildRequested) => debouncer.trigger(),
                Some(WatchEvent::Quit) | None => break,
            },

            _ = debouncer.fired(), if building.is_none() => {
                building = Some(Box::pin(run_build(builder, mode)));
            }

            result = in_flight(&mut building) => {
                building = None;
                if let Err(e) = result {
                    ui::error(&e.to_string());
                }
                // outDir may have moved with the config
                watcher.filter().set_output_dirs(output_dirs(&cwd));
            }
        }
    }

    if building.take().is_some() {
        ui::warning("Build interrupted");
    }
    ui::info("Stopped watching");
    Ok(())
}

/// Drive the running build, if any; pending forever otherwise.
async fn in_flight(building: &mut Option<BuildFuture<'_>>) -> Result<BuildSummary> {
    match building {
        Some(build) => build.await,
        None => std::future::pending().await,
    }
}

/// Resolve on SIGINT. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

fn output_dirs(cwd: &Path) -> Vec<PathBuf> {
    config::load_config(cwd)
        .map(|entries| entries.into_iter().map(|e| e.out_dir).collect())
        .unwrap_or_default()
}
