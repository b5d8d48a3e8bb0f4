use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Runtime environment a config entry's JavaScript is built for.
///
/// Selects both the defaults that apply and which build step runs: browser
/// entries go through the bundler, node entries through the type-checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Browser,
    Node,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Browser => f.write_str("browser"),
            Target::Node => f.write_str("node"),
        }
    }
}

/// One entry of `packle.config.json`, exactly as written by the user.
///
/// Every field is optional; omitted fields are filled from the default table
/// for the entry's target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    /// `browser` or `node`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,

    /// Output directory, relative to the project directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    /// Script entry points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js_entries: Option<Vec<PathBuf>>,

    /// Stylesheet entry points (`.css`, `.scss`, `.sass`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_entries: Option<Vec<PathBuf>>,

    /// Static files copied verbatim into the output directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_files: Option<Vec<PathBuf>>,
}

/// Top-level shape of `packle.config.json`: one object or a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigFile {
    Single(RawEntry),
    Multiple(Vec<RawEntry>),
}

impl ConfigFile {
    /// Parse the file contents, picking the shape from the first token.
    ///
    /// Deserializing the chosen shape directly keeps serde's own message
    /// (`unknown variant`, `invalid type`) and its line/column.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        if content.trim_start().starts_with('[') {
            serde_json::from_str(content).map(ConfigFile::Multiple)
        } else {
            serde_json::from_str(content).map(ConfigFile::Single)
        }
    }

    /// Flatten into the list form; a single object is a one-element list.
    pub fn into_entries(self) -> Vec<RawEntry> {
        match self {
            ConfigFile::Single(entry) => vec![entry],
            ConfigFile::Multiple(entries) => entries,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile::Single(RawEntry::default())
    }
}

/// A fully normalized config entry, ready to build.
///
/// Every path is absolute, and every path in the three lists existed on disk
/// when the entry was resolved. `out_dir` may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEntry {
    pub target: Target,
    pub out_dir: PathBuf,
    pub js_entries: Vec<PathBuf>,
    pub css_entries: Vec<PathBuf>,
    pub copy_files: Vec<PathBuf>,
}
