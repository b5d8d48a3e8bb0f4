use std::path::PathBuf;

/// Parse and validate the `--cwd` argument.
///
/// The directory must exist; it is canonicalized so that watch events and
/// resolved config paths share one spelling.
///
/// # Errors
///
/// Returns an error message if the path is missing or not a directory.
pub fn parse_project_dir(s: &str) -> Result<PathBuf, String> {
    if s.is_empty() {
        return Err("Project directory cannot be empty".to_string());
    }

    let path = PathBuf::from(s);
    if !path.is_dir() {
        return Err(format!("Not a directory: '{}'", s));
    }

    path.canonicalize()
        .map_err(|e| format!("Cannot resolve '{}': {}", s, e))
}
