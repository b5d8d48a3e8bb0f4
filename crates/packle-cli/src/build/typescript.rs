//! Type-check and compile node entries with `tsc`.
//!
//! tsc is driven through a transient project file written next to the
//! project's own config and removed once the run is over.

use crate::build::bundler::BundleOutcome;
use crate::build::tools::{resolve_tool, run_tool};
use crate::error::BuildError;
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name of the transient project descriptor.
pub const TRANSIENT_TSCONFIG: &str = "packle-tsconfig.json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions<'a> {
    es_module_interop: bool,
    jsx: &'static str,
    out_dir: &'a Path,
    skip_lib_check: bool,
    declaration: bool,
    module: &'static str,
    module_resolution: &'static str,
    target: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig<'a> {
    compiler_options: CompilerOptions<'a>,
    files: &'a [PathBuf],
}

/// Render the project descriptor for `entries` compiled into `out_dir`.
pub fn render_tsconfig(entries: &[PathBuf], out_dir: &Path) -> Result<String, serde_json::Error> {
    let config = TsConfig {
        compiler_options: CompilerOptions {
            es_module_interop: true,
            jsx: "react",
            out_dir,
            skip_lib_check: true,
            declaration: true,
            module: "nodenext",
            module_resolution: "nodenext",
            target: "esnext",
        },
        files: entries,
    };
    serde_json::to_string_pretty(&config)
}

/// A project descriptor on disk, deleted when dropped.
#[derive(Debug)]
pub struct TransientProject {
    path: PathBuf,
}

impl TransientProject {
    /// Write the descriptor into `cwd`.
    pub fn write(cwd: &Path, entries: &[PathBuf], out_dir: &Path) -> Result<Self, BuildError> {
        let path = cwd.join(TRANSIENT_TSCONFIG);
        let content = render_tsconfig(entries, out_dir)
            .map_err(|e| BuildError::Custom(format!("Failed to render {TRANSIENT_TSCONFIG}: {e}")))?;
        std::fs::write(&path, content).map_err(|source| BuildError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientProject {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove {}: {}", self.path.display(), e);
        }
    }
}

/// A type-checking compiler driven by a project file.
#[async_trait]
pub trait TypeChecker: Send + Sync {
    async fn compile(&self, cwd: &Path, project: &Path) -> Result<BundleOutcome, BuildError>;
}

/// [`TypeChecker`] backed by the `tsc` executable.
#[derive(Debug, Clone)]
pub struct TscChecker {
    program: PathBuf,
}

impl TscChecker {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn for_project(cwd: &Path) -> Self {
        Self::new(resolve_tool("tsc", cwd))
    }
}

#[async_trait]
impl TypeChecker for TscChecker {
    async fn compile(&self, cwd: &Path, project: &Path) -> Result<BundleOutcome, BuildError> {
        let args = vec!["--project".to_string(), project.display().to_string()];
        let output = run_tool(&self.program, &args, cwd).await?;
        if output.success {
            Ok(BundleOutcome::ok())
        } else {
            // tsc reports diagnostics on stdout
            Ok(BundleOutcome::failed(format!("{}{}", output.stdout, output.stderr)))
        }
    }
}
