//! JavaScript/TypeScript bundling for browser entries.
//!
//! Module graph construction, transpilation and minification are delegated
//! to esbuild. This module only shapes its inputs and reads its verdict.

use crate::build::tools::{resolve_tool, run_tool};
use crate::config::Target;
use crate::env::Definitions;
use crate::error::BuildError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Asset file types emitted next to the bundle instead of being inlined.
const FILE_LOADER_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "avif", "ico", "woff", "woff2", "ttf", "otf",
];

/// Everything the bundler needs for one config entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRequest {
    /// Project directory the bundler runs in
    pub cwd: PathBuf,
    /// Entry points, absolute, in config order
    pub entries: Vec<PathBuf>,
    /// Output directory, absolute
    pub out_dir: PathBuf,
    /// Runtime the output is built for
    pub platform: Target,
    /// Minify the output
    pub minify: bool,
    /// Compile-time substitutions
    pub defines: Definitions,
}

/// Verdict of a bundler run.
///
/// A failed run is not an error: the caller reports it and moves on to the
/// next entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutcome {
    pub success: bool,
    /// Diagnostic output when the run failed
    pub diagnostics: String,
}

impl BundleOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            diagnostics: String::new(),
        }
    }

    pub fn failed(diagnostics: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostics: diagnostics.into(),
        }
    }
}

/// A module bundler.
#[async_trait]
pub trait JsBundler: Send + Sync {
    /// Bundle `request.entries` into `request.out_dir`.
    ///
    /// Errors are reserved for the bundler not running at all.
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleOutcome, BuildError>;
}

/// [`JsBundler`] backed by the `esbuild` executable.
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    program: PathBuf,
}

impl EsbuildBundler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use the project's local esbuild if installed, else the one on `PATH`.
    pub fn for_project(cwd: &Path) -> Self {
        Self::new(resolve_tool("esbuild", cwd))
    }
}

#[async_trait]
impl JsBundler for EsbuildBundler {
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleOutcome, BuildError> {
        let output = run_tool(&self.program, &esbuild_args(request), &request.cwd).await?;
        if output.success {
            Ok(BundleOutcome::ok())
        } else {
            let mut diagnostics = output.stderr;
            if diagnostics.trim().is_empty() {
                diagnostics = format!("esbuild exited with status {:?}", output.code);
            }
            Ok(BundleOutcome::failed(diagnostics))
        }
    }
}

/// Command line for one esbuild run.
///
/// Assets keep their source directory and base name (`[dir]/[name]`).
pub fn esbuild_args(request: &BundleRequest) -> Vec<String> {
    let mut args: Vec<String> = request
        .entries
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    args.push("--bundle".to_string());
    args.push(format!("--outdir={}", request.out_dir.display()));
    args.push(format!("--platform={}", request.platform));
    args.push("--asset-names=[dir]/[name]".to_string());
    for ext in FILE_LOADER_EXTENSIONS {
        args.push(format!("--loader:.{ext}=file"));
    }
    if request.minify {
        args.push("--minify".to_string());
    }
    for (key, value) in &request.defines {
        args.push(format!("--define:{key}={value}"));
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{define_map, Mode};

    fn request(minify: bool) -> BundleRequest {
        let mut env = Definitions::new();
        env.insert("process.env.API_URL".into(), r#""https://example.com""#.into());
        BundleRequest {
            cwd: PathBuf::from("/project"),
            entries: vec![
                PathBuf::from("/project/src/index.ts"),
                PathBuf::from("/project/src/worker.ts"),
            ],
            out_dir: PathBuf::from("/project/public"),
            platform: Target::Browser,
            minify,
            defines: define_map(&env, Mode::from_production_flag(minify)),
        }
    }

    #[test]
    fn test_esbuild_args_entries_first_in_order() {
        let args = esbuild_args(&request(false));
        assert_eq!(args[0], "/project/src/index.ts");
        assert_eq!(args[1], "/project/src/worker.ts");
        assert!(args.contains(&"--bundle".to_string()));
        assert!(args.contains(&"--outdir=/project/public".to_string()));
        assert!(args.contains(&"--platform=browser".to_string()));
        assert!(args.contains(&"--asset-names=[dir]/[name]".to_string()));
    }

    #[test]
    fn test_esbuild_args_minify_only_in_production() {
        assert!(!esbuild_args(&request(false)).contains(&"--minify".to_string()));
        assert!(esbuild_args(&request(true)).contains(&"--minify".to_string()));
    }

    #[test]
    fn test_esbuild_args_defines() {
        let args = esbuild_args(&request(true));
        assert!(args.contains(&r#"--define:process.env.API_URL="https://example.com""#.to_string()));
        assert!(args.contains(&r#"--define:process.env.NODE_ENV="production""#.to_string()));
    }

    #[test]
    fn test_outcome_constructors() {
        assert!(BundleOutcome::ok().success);
        let failed = BundleOutcome::failed("Could not resolve \"react\"");
        assert!(!failed.success);
        assert!(failed.diagnostics.contains("react"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_run_is_an_outcome_not_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut req = request(false);
        req.cwd = temp.path().to_path_buf();

        // `false` ignores its arguments and exits 1.
        let outcome = EsbuildBundler::new("false").bundle(&req).await.unwrap();
        assert!(!outcome.success);
        assert!(outcome.diagnostics.contains("status"));
    }
}
