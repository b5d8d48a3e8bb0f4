//! Miette diagnostic conversion for CLI errors.

use crate::error::{BuildError, CliError, ConfigError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => config_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::InvalidJson { path, source } => miette::miette!(
            help = "packle.config.json must hold an object or an array of objects",
            "Invalid JSON in {} (line {}, column {}): {}",
            path.display(),
            source.line(),
            source.column(),
            source
        ),
        other => miette::miette!("Configuration error: {}", other),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::ToolSpawn { tool, source } => miette::miette!(
            help = "Install it in the project (node_modules/.bin) or put it on PATH",
            "Failed to run '{}': {}",
            tool,
            source
        ),
        BuildError::Stylesheet { file, message } => {
            miette::miette!("Failed to compile stylesheet {}:\n{}", file.display(), message)
        }
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_invalid_json_report_mentions_location() {
        let source = serde_json::from_str::<serde_json::Value>("{\n  \"outDir\": }").unwrap_err();
        let report = cli_error_to_miette(CliError::Config(ConfigError::InvalidJson {
            path: PathBuf::from("packle.config.json"),
            source,
        }));
        let msg = report.to_string();
        assert!(msg.contains("packle.config.json"));
        assert!(msg.contains("line 2"));
    }

    #[test]
    fn test_stylesheet_report() {
        let report = build_error_to_miette(BuildError::Stylesheet {
            file: PathBuf::from("src/index.scss"),
            message: "Undefined variable".into(),
        });
        assert!(report.to_string().contains("Undefined variable"));
    }
}
