//! Mapping source files to their place in an output directory.

use crate::error::BuildError;
use std::path::{Path, PathBuf};

/// Where files under the project land inside an output directory.
///
/// Files below the source root keep their path relative to it, so
/// `src/pages/about.html` becomes `<out>/pages/about.html`. Files outside it
/// fall back to their path relative to the project directory, and finally to
/// their bare file name.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    cwd: PathBuf,
    source_root: PathBuf,
}

impl OutputLayout {
    pub fn new(cwd: impl Into<PathBuf>, source_root: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            source_root: source_root.into(),
        }
    }

    /// Destination of `file` inside `out_dir`.
    pub fn destination(&self, file: &Path, out_dir: &Path) -> PathBuf {
        let relative = file
            .strip_prefix(&self.source_root)
            .or_else(|_| file.strip_prefix(&self.cwd))
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| file.file_name().map(PathBuf::from).unwrap_or_default());
        out_dir.join(relative)
    }

    /// Destination of a compiled stylesheet: same place, `.css` extension.
    pub fn stylesheet_destination(&self, file: &Path, out_dir: &Path) -> PathBuf {
        self.destination(file, out_dir).with_extension("css")
    }
}

/// Copy `from` to `to`, creating parent directories as needed.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), BuildError> {
    ensure_parent(to)?;
    std::fs::copy(from, to).map_err(|source| BuildError::WriteFailed {
        path: to.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Write `contents` to `to`, creating parent directories as needed.
pub fn write_file(to: &Path, contents: &str) -> Result<(), BuildError> {
    ensure_parent(to)?;
    std::fs::write(to, contents).map_err(|source| BuildError::WriteFailed {
        path: to.to_path_buf(),
        source,
    })
}

fn ensure_parent(path: &Path) -> Result<(), BuildError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| BuildError::WriteFailed {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout() -> OutputLayout {
        OutputLayout::new("/p", "/p/src")
    }

    #[test]
    fn test_destination_relative_to_source_root() {
        let out = Path::new("/p/public");
        assert_eq!(
            layout().destination(Path::new("/p/src/index.html"), out),
            PathBuf::from("/p/public/index.html")
        );
        assert_eq!(
            layout().destination(Path::new("/p/src/pages/about.html"), out),
            PathBuf::from("/p/public/pages/about.html")
        );
    }

    #[test]
    fn test_destination_outside_source_root() {
        let out = Path::new("/p/public");
        assert_eq!(
            layout().destination(Path::new("/p/static/robots.txt"), out),
            PathBuf::from("/p/public/static/robots.txt")
        );
        assert_eq!(
            layout().destination(Path::new("/elsewhere/logo.svg"), out),
            PathBuf::from("/p/public/logo.svg")
        );
    }

    #[test]
    fn test_stylesheet_destination_rewrites_extension() {
        let out = Path::new("/p/public");
        assert_eq!(
            layout().stylesheet_destination(Path::new("/p/src/styles/main.scss"), out),
            PathBuf::from("/p/public/styles/main.css")
        );
        assert_eq!(
            layout().stylesheet_destination(Path::new("/p/src/index.css"), out),
            PathBuf::from("/p/public/index.css")
        );
    }

    #[test]
    fn test_copy_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("a.txt");
        fs::write(&from, "hello").unwrap();
        let to = temp.path().join("out/nested/a.txt");

        copy_file(&from, &to).unwrap();
        assert_eq!(fs::read_to_string(to).unwrap(), "hello");
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let err = copy_file(&temp.path().join("gone"), &temp.path().join("out/gone")).unwrap_err();
        assert!(matches!(err, BuildError::WriteFailed { .. }));
    }
}
