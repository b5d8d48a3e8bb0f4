//! Build orchestration.
//!
//! For each normalized config entry, in order:
//!
//! 1. create the output directory
//! 2. copy static files
//! 3. browser: bundle scripts with the `.env` definitions and build mode;
//!    node: type-check and compile scripts through a transient project file
//! 4. compile stylesheets to `.css`
//!
//! The actual bundling and compiling is done by external tools behind the
//! [`JsBundler`], [`StylesheetCompiler`] and [`TypeChecker`] traits. A tool
//! that runs but reports failure is logged and the build moves on; I/O and
//! stylesheet errors abort the run.

pub mod bundler;
pub mod output;
pub mod stylesheet;
pub mod tools;
pub mod typescript;

pub use bundler::{BundleOutcome, BundleRequest, EsbuildBundler, JsBundler};
pub use output::OutputLayout;
pub use stylesheet::{DefaultStylesheetCompiler, StylesheetCompiler};
pub use typescript::{TransientProject, TscChecker, TypeChecker, TRANSIENT_TSCONFIG};

use crate::config::{self, BuildEntry, Target, SOURCE_DIR_NAME};
use crate::env::{self, Definitions, Mode};
use crate::error::{BuildError, Result};
use crate::ui;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-run tally. Tool failures are counted, not fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Config entries processed
    pub entries: usize,
    /// Files copied verbatim
    pub copied: usize,
    /// Stylesheets compiled
    pub stylesheets: usize,
    /// Bundler runs that reported failure
    pub bundle_failures: usize,
    /// Type-checker runs that reported failure
    pub type_check_failures: usize,
}

impl BuildSummary {
    pub fn has_failures(&self) -> bool {
        self.bundle_failures > 0 || self.type_check_failures > 0
    }
}

/// Runs builds for one project directory.
#[derive(Clone)]
pub struct Builder {
    cwd: PathBuf,
    layout: OutputLayout,
    bundler: Arc<dyn JsBundler>,
    stylesheets: Arc<dyn StylesheetCompiler>,
    type_checker: Arc<dyn TypeChecker>,
}

impl Builder {
    /// Builder wired to the real tools found for the project.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        Self {
            layout: OutputLayout::new(&cwd, cwd.join(SOURCE_DIR_NAME)),
            bundler: Arc::new(EsbuildBundler::for_project(&cwd)),
            stylesheets: Arc::new(DefaultStylesheetCompiler::for_project(&cwd)),
            type_checker: Arc::new(TscChecker::for_project(&cwd)),
            cwd,
        }
    }

    pub fn with_bundler(mut self, bundler: Arc<dyn JsBundler>) -> Self {
        self.bundler = bundler;
        self
    }

    pub fn with_stylesheet_compiler(mut self, compiler: Arc<dyn StylesheetCompiler>) -> Self {
        self.stylesheets = compiler;
        self
    }

    pub fn with_type_checker(mut self, checker: Arc<dyn TypeChecker>) -> Self {
        self.type_checker = checker;
        self
    }

    /// Override the directory whose layout is mirrored into outputs.
    pub fn with_source_root(mut self, source_root: impl Into<PathBuf>) -> Self {
        self.layout = OutputLayout::new(&self.cwd, source_root);
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Load config and `.env` fresh from disk, then build every entry.
    pub async fn build(&self, mode: Mode) -> Result<BuildSummary> {
        let entries = config::load_config(&self.cwd)?;
        let env = if entries.iter().any(|e| e.target == Target::Browser) {
            env::load_env(&self.cwd)?
        } else {
            Definitions::new()
        };
        self.build_entries(&entries, &env, mode).await
    }

    /// Build already-normalized entries, sequentially and in order.
    pub async fn build_entries(
        &self,
        entries: &[BuildEntry],
        env: &Definitions,
        mode: Mode,
    ) -> Result<BuildSummary> {
        let mut summary = BuildSummary::default();
        for entry in entries {
            self.build_entry(entry, env, mode, &mut summary).await?;
            summary.entries += 1;
        }
        Ok(summary)
    }

    async fn build_entry(
        &self,
        entry: &BuildEntry,
        env: &Definitions,
        mode: Mode,
        summary: &mut BuildSummary,
    ) -> Result<()> {
        let out_display = ui::display_relative(&entry.out_dir, &self.cwd);
        tracing::debug!("Building {} entry into {}", entry.target, entry.out_dir.display());

        std::fs::create_dir_all(&entry.out_dir).map_err(|source| BuildError::WriteFailed {
            path: entry.out_dir.clone(),
            source,
        })?;

        for file in &entry.copy_files {
            let dest = self.layout.destination(file, &entry.out_dir);
            tracing::debug!("Copying {} -> {}", file.display(), dest.display());
            output::copy_file(file, &dest)?;
            summary.copied += 1;
        }

        match entry.target {
            Target::Browser => {
                if !self.bundle_scripts(entry, env, mode).await? {
                    ui::error(&format!("Bundling failed for {}", out_display));
                    summary.bundle_failures += 1;
                }
            }
            Target::Node => {
                if !self.compile_scripts(entry).await? {
                    ui::warning(&format!("Type check reported errors for {}", out_display));
                    summary.type_check_failures += 1;
                }
            }
        }

        for file in &entry.css_entries {
            let dest = self.layout.stylesheet_destination(file, &entry.out_dir);
            let spinner = ui::Spinner::new(&format!(
                "Compiling {}",
                ui::display_relative(file, &self.cwd)
            ));
            let css = self.stylesheets.compile(file, mode.is_production()).await;
            spinner.clear();
            output::write_file(&dest, &css?)?;
            summary.stylesheets += 1;
        }

        Ok(())
    }

    /// Returns whether the bundler succeeded (or had nothing to do).
    async fn bundle_scripts(&self, entry: &BuildEntry, env: &Definitions, mode: Mode) -> Result<bool> {
        if entry.js_entries.is_empty() {
            tracing::debug!("No script entries for {}", entry.out_dir.display());
            return Ok(true);
        }

        let request = BundleRequest {
            cwd: self.cwd.clone(),
            entries: entry.js_entries.clone(),
            out_dir: entry.out_dir.clone(),
            platform: Target::Browser,
            minify: mode.is_production(),
            defines: env::define_map(env, mode),
        };

        let spinner = ui::Spinner::new("Bundling scripts...");
        let outcome = self.bundler.bundle(&request).await;
        spinner.clear();
        let outcome = outcome?;

        if !outcome.success {
            for line in outcome.diagnostics.lines() {
                ui::hint(line);
            }
        }
        Ok(outcome.success)
    }

    /// Returns whether the type-checker succeeded (or had nothing to do).
    async fn compile_scripts(&self, entry: &BuildEntry) -> Result<bool> {
        if entry.js_entries.is_empty() {
            return Ok(true);
        }

        let project = TransientProject::write(&self.cwd, &entry.js_entries, &entry.out_dir)?;
        let spinner = ui::Spinner::new("Type checking...");
        let outcome = self.type_checker.compile(&self.cwd, project.path()).await;
        spinner.clear();
        drop(project);
        let outcome = outcome?;

        if !outcome.success {
            for line in outcome.diagnostics.lines() {
                ui::hint(line);
            }
        }
        Ok(outcome.success)
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("cwd", &self.cwd)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
