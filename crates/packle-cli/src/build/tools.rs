//! Locating and running external executables.

use crate::error::BuildError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Captured result of one external tool run.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Resolve an executable, preferring the project's local install.
///
/// `node_modules/.bin/<name>` under `cwd` wins; otherwise the bare name is
/// returned and looked up on `PATH` at spawn time.
pub fn resolve_tool(name: &str, cwd: &Path) -> PathBuf {
    let bin_dir = cwd.join("node_modules").join(".bin");
    let candidates = if cfg!(windows) {
        vec![bin_dir.join(format!("{name}.cmd")), bin_dir.join(name)]
    } else {
        vec![bin_dir.join(name)]
    };

    candidates
        .into_iter()
        .find(|p| p.is_file())
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Run `program` with `args` in `cwd`, capturing both output streams.
///
/// Only a failure to start the process is an error; a non-zero exit is
/// reported through [`ToolOutput::success`]. Dropping the future kills the
/// child, so quitting watch mode mid-build leaves no tool running.
pub async fn run_tool(program: &Path, args: &[String], cwd: &Path) -> Result<ToolOutput, BuildError> {
    tracing::debug!("Running {} {}", program.display(), args.join(" "));

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| BuildError::ToolSpawn {
            tool: program.display().to_string(),
            source,
        })?;

    Ok(ToolOutput {
        success: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
