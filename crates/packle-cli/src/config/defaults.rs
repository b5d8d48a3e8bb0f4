//! Default table for `packle.config.json` fields.
//!
//! One function per field. Stylesheet and copy defaults depend on the
//! entry's target: a node build has no page to style or serve.

use std::path::PathBuf;

use crate::config::types::Target;

/// Name of the optional config file in the project directory.
pub const CONFIG_FILE_NAME: &str = "packle.config.json";

/// Directory whose layout is mirrored into the output directory.
pub const SOURCE_DIR_NAME: &str = "src";

pub fn default_target() -> Target {
    Target::Browser
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("./public")
}

pub fn default_js_entries() -> Vec<PathBuf> {
    paths(&[
        "./src/index.ts",
        "./src/index.tsx",
        "./src/index.js",
        "./src/index.jsx",
    ])
}

pub fn default_css_entries(target: Target) -> Vec<PathBuf> {
    match target {
        Target::Browser => paths(&["./src/index.scss", "./src/index.css"]),
        Target::Node => Vec::new(),
    }
}

pub fn default_copy_files(target: Target) -> Vec<PathBuf> {
    match target {
        Target::Browser => paths(&["./src/index.html"]),
        Target::Node => Vec::new(),
    }
}

fn paths(list: &[&str]) -> Vec<PathBuf> {
    list.iter().map(PathBuf::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_entry_candidates_in_priority_order() {
        let entries = default_js_entries();
        let names: Vec<_> = entries
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["index.ts", "index.tsx", "index.js", "index.jsx"]);
    }

    #[test]
    fn test_node_target_has_no_page_defaults() {
        assert!(default_css_entries(Target::Node).is_empty());
        assert!(default_copy_files(Target::Node).is_empty());
    }

    #[test]
    fn test_browser_target_defaults() {
        assert_eq!(default_css_entries(Target::Browser).len(), 2);
        assert_eq!(default_copy_files(Target::Browser), [PathBuf::from("./src/index.html")]);
    }
}
