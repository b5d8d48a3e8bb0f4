//! Configuration loading for Packle.
//!
//! Reads the optional `packle.config.json` (one object or an array of
//! objects), fills omitted fields from a target-aware default table, resolves
//! every path against the project directory and drops paths that do not
//! exist. The result is rebuilt from disk on every build.

mod defaults;
mod loading;
mod types;

pub use defaults::*;
pub use loading::{load_config, read_config_file, resolve_existing, resolve_path};
pub use types::*;
