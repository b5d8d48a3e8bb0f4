//! Packle - a minimal front-end asset bundler.
//!
//! Packle reads an optional `packle.config.json`, resolves script, stylesheet
//! and static-file entries against the project directory, and fills one
//! output directory per config entry. Bundling, type-checking and Sass
//! compilation are delegated to external tools (`esbuild`, `tsc`, `sass`);
//! plain CSS goes through `lightningcss` in process.
//!
//! # Architecture
//!
//! - [`config`] - config file loading, defaults and path resolution
//! - [`env`] - `.env` definitions injected into browser bundles
//! - [`build`] - per-entry orchestration over pluggable tool traits
//! - [`watch`] - debounced rebuilds on file changes and keypresses
//! - [`commands`] - the CLI entry point
//! - [`error`] - error types with actionable messages
//! - [`logger`] - structured logging with tracing
//! - [`ui`] - status lines and spinners
//!
//! # Example
//!
//! ```rust,no_run
//! use packle::{build::Builder, env::Mode, Result};
//!
//! # async fn run() -> Result<()> {
//! let builder = Builder::new("/path/to/project");
//! let summary = builder.build(Mode::Production).await?;
//! println!("{} entries built", summary.entries);
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod error;
pub mod logger;
pub mod ui;
pub mod watch;

pub use build::{BuildSummary, Builder};
pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
