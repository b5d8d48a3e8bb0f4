//! Error handling for the Packle CLI.
//!
//! Errors are split along the same lines as the build pipeline:
//! - **Top-level errors** (`CliError`) are what commands return
//! - **Domain errors** (`ConfigError`, `BuildError`) carry the detail
//! - Conversions are automatic via `#[from]`
//!
//! Only unrecoverable conditions are errors. Missing config, `.env`, or entry
//! files are normal defaulted cases, and a failed bundler run is reported as a
//! [`BundleOutcome`](crate::build::BundleOutcome), not an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use packle::error::{Result, ResultExt};
//! use std::path::PathBuf;
//!
//! fn project_dir() -> Result<PathBuf> {
//!     std::env::current_dir().with_hint("Pass the project directory with --cwd")
//! }
//! ```

pub mod miette;

use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (malformed JSON, unreadable `.env`)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Build process errors (tool spawn failures, stylesheet errors)
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `packle.config.json` exists but is not valid JSON of the expected shape
    #[error("Invalid JSON in {}: {source}\n\nHint: The config must be an object or an array of objects", .path.display())]
    InvalidJson {
        /// Config file that failed to parse
        path: PathBuf,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// `.env` exists but could not be parsed
    #[error("Invalid .env file {}: {message}\n\nHint: Use KEY=VALUE lines, one per line", .path.display())]
    InvalidEnv {
        /// Env file that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// I/O error while reading config
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Build process errors.
///
/// A bundler run that reports failure is not one of these; see
/// [`BundleOutcome`](crate::build::BundleOutcome).
#[derive(Debug, Error)]
pub enum BuildError {
    /// An external tool could not be started at all
    #[error("Failed to run '{tool}': {source}\n\nHint: Install it in the project (node_modules/.bin) or put it on PATH")]
    ToolSpawn {
        /// Executable that was attempted
        tool: String,
        /// Spawn error
        #[source]
        source: std::io::Error,
    },

    /// The stylesheet compiler rejected a file
    #[error("Failed to compile stylesheet {}: {message}", .file.display())]
    Stylesheet {
        /// Stylesheet that failed
        file: PathBuf,
        /// Compiler message
        message: String,
    },

    /// Failed to write an output file
    #[error("Failed to write {}: {source}\n\nHint: Check output directory permissions", .path.display())]
    WriteFailed {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Generic build error
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding a hint to `Result` types.
pub trait ResultExt<T> {
    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }
}
