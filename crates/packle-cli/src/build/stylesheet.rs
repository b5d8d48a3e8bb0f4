//! Stylesheet compilation.
//!
//! Plain `.css` is parsed and printed in process with lightningcss, which
//! validates the file and minifies it for production. Sass sources are handed
//! to the external `sass` compiler.

use crate::build::tools::{resolve_tool, run_tool};
use crate::error::BuildError;
use async_trait::async_trait;
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};
use std::path::{Path, PathBuf};

/// A stylesheet compiler: source file in, CSS text out.
#[async_trait]
pub trait StylesheetCompiler: Send + Sync {
    async fn compile(&self, file: &Path, minify: bool) -> Result<String, BuildError>;
}

/// Default compiler: lightningcss for `.css`, `sass` for `.scss`/`.sass`.
#[derive(Debug, Clone)]
pub struct DefaultStylesheetCompiler {
    cwd: PathBuf,
    sass: PathBuf,
}

impl DefaultStylesheetCompiler {
    pub fn for_project(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            sass: resolve_tool("sass", cwd),
        }
    }
}

#[async_trait]
impl StylesheetCompiler for DefaultStylesheetCompiler {
    async fn compile(&self, file: &Path, minify: bool) -> Result<String, BuildError> {
        if is_sass(file) {
            compile_sass(&self.sass, &self.cwd, file, minify).await
        } else {
            let source = tokio::fs::read_to_string(file)
                .await
                .map_err(|e| BuildError::Stylesheet {
                    file: file.to_path_buf(),
                    message: e.to_string(),
                })?;
            compile_css(file, &source, minify)
        }
    }
}

fn is_sass(file: &Path) -> bool {
    matches!(
        file.extension().and_then(|e| e.to_str()),
        Some("scss") | Some("sass")
    )
}

async fn compile_sass(
    sass: &Path,
    cwd: &Path,
    file: &Path,
    minify: bool,
) -> Result<String, BuildError> {
    let mut args = vec!["--no-source-map".to_string()];
    if minify {
        args.push("--style=compressed".to_string());
    }
    args.push(file.display().to_string());

    let output = run_tool(sass, &args, cwd).await?;
    if !output.success {
        return Err(BuildError::Stylesheet {
            file: file.to_path_buf(),
            message: output.stderr.trim().to_string(),
        });
    }
    Ok(output.stdout)
}

/// Parse and re-print plain CSS.
pub fn compile_css(file: &Path, source: &str, minify: bool) -> Result<String, BuildError> {
    let failed = |message: String| BuildError::Stylesheet {
        file: file.to_path_buf(),
        message,
    };

    let mut stylesheet = StyleSheet::parse(
        source,
        ParserOptions {
            filename: file.to_string_lossy().to_string(),
            ..Default::default()
        },
    )
    .map_err(|e| failed(e.to_string()))?;

    if minify {
        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| failed(e.to_string()))?;
    }

    let result = stylesheet
        .to_css(PrinterOptions {
            minify,
            ..Default::default()
        })
        .map_err(|e| failed(e.to_string()))?;

    Ok(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compile_css_pretty() {
        let css = compile_css(Path::new("index.css"), "body{color:red}", false).unwrap();
        assert!(css.contains("body {"));
        assert!(css.contains("color: red"));
    }

    #[test]
    fn test_compile_css_minified() {
        let css = compile_css(
            Path::new("index.css"),
            "body {\n  color: #ff0000;\n  margin: 0px;\n}\n",
            true,
        )
        .unwrap();
        assert!(!css.contains('\n'));
        assert!(css.starts_with("body{"));
    }

    #[test]
    fn test_compile_css_rejects_invalid_selector() {
        let err = compile_css(Path::new("broken.css"), "!!! { color: red }", false).unwrap_err();
        match err {
            BuildError::Stylesheet { file, .. } => assert_eq!(file, Path::new("broken.css")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_is_sass() {
        assert!(is_sass(Path::new("a/index.scss")));
        assert!(is_sass(Path::new("a/index.sass")));
        assert!(!is_sass(Path::new("a/index.css")));
    }

    #[tokio::test]
    async fn test_default_compiler_reads_css_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("index.css");
        fs::write(&file, "h1 { font-weight: bold }").unwrap();

        let compiler = DefaultStylesheetCompiler::for_project(temp.path());
        let css = compiler.compile(&file, false).await.unwrap();
        assert!(css.contains("font-weight: bold"));
    }
}
