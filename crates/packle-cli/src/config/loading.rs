use crate::config::defaults::*;
use crate::config::types::{BuildEntry, ConfigFile, RawEntry};
use crate::error::ConfigError;
use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Load and normalize every config entry for the project in `cwd`.
///
/// A missing `packle.config.json` yields one all-default entry. Malformed
/// JSON is the only failure.
pub fn load_config(cwd: &Path) -> Result<Vec<BuildEntry>, ConfigError> {
    let file = read_config_file(cwd)?;
    Ok(file
        .into_entries()
        .into_iter()
        .map(|raw| raw.resolve(cwd))
        .collect())
}

/// Read `packle.config.json` from `cwd` without applying defaults.
pub fn read_config_file(cwd: &Path) -> Result<ConfigFile, ConfigError> {
    let path = cwd.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, cwd.display());
        return Ok(ConfigFile::default());
    }

    let content = std::fs::read_to_string(&path)?;
    ConfigFile::from_json(&content).map_err(|source| ConfigError::InvalidJson { path, source })
}

impl RawEntry {
    /// Apply the default table, then resolve and filter every path.
    ///
    /// Defaults are applied field by field in a fixed order; target first,
    /// since the stylesheet and copy defaults depend on it.
    pub fn resolve(self, cwd: &Path) -> BuildEntry {
        let target = self.target.unwrap_or_else(default_target);
        let out_dir = self.out_dir.unwrap_or_else(default_out_dir);
        let js_entries = self.js_entries.unwrap_or_else(default_js_entries);
        let css_entries = self
            .css_entries
            .unwrap_or_else(|| default_css_entries(target));
        let copy_files = self
            .copy_files
            .unwrap_or_else(|| default_copy_files(target));

        BuildEntry {
            target,
            out_dir: resolve_path(&out_dir, cwd),
            js_entries: resolve_existing(&js_entries, cwd),
            css_entries: resolve_existing(&css_entries, cwd),
            copy_files: resolve_existing(&copy_files, cwd),
        }
    }
}

/// Resolve `path` against `cwd` and normalize `.`/`..` components.
///
/// Absolute paths are kept as they are (normalized).
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    cwd.join(path).clean()
}

/// Resolve every path and keep only those that exist, in order.
pub fn resolve_existing(paths: &[PathBuf], cwd: &Path) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|p| resolve_path(p, cwd))
        .filter(|p| {
            let exists = p.exists();
            if !exists {
                tracing::debug!("Skipping missing path: {}", p.display());
            }
            exists
        })
        .collect()
}
