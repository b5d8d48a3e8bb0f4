//! Compile-time definitions injected into browser bundles.
//!
//! Values come strictly from the project's `.env` file; the live process
//! environment is never read, so a bundle's contents depend only on files in
//! the project. Each `KEY=VALUE` pair becomes a substitution of
//! `process.env.KEY` by the JSON string literal of `VALUE`.

use crate::error::ConfigError;
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the optional env file in the project directory.
pub const ENV_FILE_NAME: &str = ".env";

/// Identifier replaced by the build mode.
pub const NODE_ENV_KEY: &str = "process.env.NODE_ENV";

/// Ordered mapping from identifier expression to replacement source text.
pub type Definitions = BTreeMap<String, String>;

/// Build mode, as seen by bundled code through `process.env.NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn from_production_flag(production: bool) -> Self {
        if production {
            Mode::Production
        } else {
            Mode::Development
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }

    pub fn is_production(self) -> bool {
        self == Mode::Production
    }
}

/// Load `.env` from `cwd` as definitions.
///
/// A missing file yields an empty map. No key validation is done. Values are
/// taken literally: `$NAME` is not expanded.
pub fn load_env(cwd: &Path) -> Result<Definitions, ConfigError> {
    let path = cwd.join(ENV_FILE_NAME);
    if !path.is_file() {
        return Ok(Definitions::new());
    }

    let source = std::fs::read_to_string(&path)?;
    let definitions = parse_env(&source).map_err(|err| ConfigError::InvalidEnv {
        path: path.clone(),
        message: err.to_string(),
    })?;

    tracing::debug!("Loaded {} definitions from {}", definitions.len(), path.display());
    Ok(definitions)
}

fn parse_env(source: &str) -> Result<Definitions, dotenvy::Error> {
    let escaped = escape_substitutions(source);
    let mut definitions = Definitions::new();
    for item in dotenvy::from_read_iter(escaped.as_bytes()) {
        let (key, value) = item?;
        definitions.insert(format!("process.env.{key}"), json_string(&value));
    }
    Ok(definitions)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Start of a line or after whitespace, where `#` opens a comment
    Boundary,
    Unquoted,
    DoubleQuoted,
    SingleQuoted,
    Comment,
}

/// Escape each `$` that dotenvy would expand, so it parses as a literal `$`.
///
/// dotenvy substitutes `$NAME` from earlier pairs and from the process
/// environment in unquoted and double-quoted text. Single-quoted text and
/// comments are left alone, as are `\$` sequences already in the file.
fn escape_substitutions(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = Scan::Boundary;
    let mut chars = source.chars();

    while let Some(c) = chars.next() {
        state = match (state, c) {
            (Scan::Comment, '\n') => Scan::Boundary,
            (Scan::Comment, _) => Scan::Comment,
            (Scan::SingleQuoted, '\'') => Scan::Unquoted,
            (Scan::SingleQuoted, _) => Scan::SingleQuoted,
            (_, '$') => {
                out.push('\\');
                if state == Scan::DoubleQuoted {
                    Scan::DoubleQuoted
                } else {
                    Scan::Unquoted
                }
            }
            (_, '\\') => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
                if state == Scan::DoubleQuoted {
                    Scan::DoubleQuoted
                } else {
                    Scan::Unquoted
                }
            }
            (Scan::DoubleQuoted, '"') => Scan::Unquoted,
            (Scan::DoubleQuoted, _) => Scan::DoubleQuoted,
            (_, '"') => Scan::DoubleQuoted,
            (_, '\'') => Scan::SingleQuoted,
            (Scan::Boundary, '#') => Scan::Comment,
            (_, c) if c.is_whitespace() => Scan::Boundary,
            _ => Scan::Unquoted,
        };
        out.push(c);
    }

    out
}

/// Definitions for one bundler run: `.env` pairs plus the build mode.
///
/// The mode always wins over a `NODE_ENV` set in `.env`.
pub fn define_map(env: &Definitions, mode: Mode) -> Definitions {
    let mut defines = env.clone();
    defines.insert(NODE_ENV_KEY.to_string(), json_string(mode.as_str()));
    defines
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_env_file_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(load_env(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_env_pairs_become_quoted_definitions() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(ENV_FILE_NAME),
            "# api settings\nAPI_URL=https://example.com\n\nGREETING=\"say \\\"hi\\\"\"\nEMPTY=\n",
        )
        .unwrap();

        let env = load_env(temp.path()).unwrap();

        assert_eq!(env.len(), 3);
        assert_eq!(env["process.env.API_URL"], r#""https://example.com""#);
        assert_eq!(env["process.env.GREETING"], r#""say \"hi\"""#);
        assert_eq!(env["process.env.EMPTY"], r#""""#);
    }

    #[test]
    #[serial]
    fn test_dollar_signs_are_literal() {
        std::env::set_var("PACKLE_TEST_SECRET", "leaked");
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(ENV_FILE_NAME),
            concat!(
                "PRICE=$5\n",
                "GREETING=\"hi $PACKLE_TEST_SECRET\"\n",
                "BRACED=${PRICE}\n",
                "SINGLE='$PACKLE_TEST_SECRET'\n",
                "# don't expand anything below\n",
                "PATTERN=^a\\$b$ # trailing comment with $HOME\n",
            ),
        )
        .unwrap();

        let env = load_env(temp.path()).unwrap();
        std::env::remove_var("PACKLE_TEST_SECRET");

        assert_eq!(env["process.env.PRICE"], r#""$5""#);
        assert_eq!(env["process.env.GREETING"], r#""hi $PACKLE_TEST_SECRET""#);
        assert_eq!(env["process.env.BRACED"], r#""${PRICE}""#);
        assert_eq!(env["process.env.SINGLE"], r#""$PACKLE_TEST_SECRET""#);
        assert_eq!(env["process.env.PATTERN"], r#""^a$b$""#);
    }

    #[test]
    fn test_escape_leaves_single_quotes_and_comments() {
        assert_eq!(escape_substitutions("A='$x'\n"), "A='$x'\n");
        assert_eq!(escape_substitutions("# $x\nB=$y\n"), "# $x\nB=\\$y\n");
        assert_eq!(escape_substitutions("C=\"a $b\"\n"), "C=\"a \\$b\"\n");
    }

    #[test]
    fn test_malformed_env_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(ENV_FILE_NAME), "BROKEN=\"unterminated\n").unwrap();

        let err = load_env(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn test_define_map_adds_mode() {
        let env = Definitions::new();
        let defines = define_map(&env, Mode::Production);
        assert_eq!(defines[NODE_ENV_KEY], r#""production""#);

        let defines = define_map(&env, Mode::Development);
        assert_eq!(defines[NODE_ENV_KEY], r#""development""#);
    }

    #[test]
    fn test_mode_overrides_env_file_node_env() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(ENV_FILE_NAME), "NODE_ENV=staging\n").unwrap();

        let env = load_env(temp.path()).unwrap();
        let defines = define_map(&env, Mode::Development);
        assert_eq!(defines[NODE_ENV_KEY], r#""development""#);
    }

    #[test]
    fn test_mode_from_flag() {
        assert!(Mode::from_production_flag(true).is_production());
        assert_eq!(Mode::from_production_flag(false).as_str(), "development");
    }
}
