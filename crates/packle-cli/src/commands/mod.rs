//! Command implementations for the Packle CLI.
//!
//! Packle has a single command: build once, then optionally watch.
//!
//! - [`build`] - one full build with status lines
//! - [`execute`] - entry point driven by the parsed [`Cli`]

pub mod build;

use crate::build::Builder;
use crate::cli::Cli;
use crate::error::{Result, ResultExt};
use crate::watch;
use std::path::PathBuf;

/// Run packle for the parsed command line.
///
/// In watch mode a failed first build is reported and watching starts anyway,
/// so fixing the offending file triggers the next attempt.
pub async fn execute(cli: Cli) -> Result<()> {
    let cwd = resolve_cwd(cli.cwd.clone())?;
    let mode = cli.mode();
    tracing::debug!("Project directory: {}", cwd.display());

    let builder = Builder::new(&cwd);

    if !cli.watch {
        build::run_build(&builder, mode).await?;
        return Ok(());
    }

    if let Err(e) = build::run_build(&builder, mode).await {
        crate::ui::error(&e.to_string());
    }
    watch::run(&builder, mode).await
}

fn resolve_cwd(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => std::env::current_dir()
            .with_hint("The current directory is not accessible; pass --cwd"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_cwd_is_kept() {
        let dir = PathBuf::from("/some/project");
        assert_eq!(resolve_cwd(Some(dir.clone())).unwrap(), dir);
    }

    #[test]
    fn test_default_cwd_is_process_dir() {
        assert_eq!(resolve_cwd(None).unwrap(), std::env::current_dir().unwrap());
    }
}
