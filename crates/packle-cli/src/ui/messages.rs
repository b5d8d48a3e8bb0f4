//! Status message functions for terminal output.

use owo_colors::OwoColorize;

use super::{colors_enabled, is_quiet};

/// Print a success message to stderr.
///
/// ```no_run
/// use packle::ui::success;
///
/// success("Bundled!");
/// ```
pub fn success(message: &str) {
    if is_quiet() {
        return;
    }
    if colors_enabled() {
        eprintln!("{} {}", "✓".green().bold(), message.green());
    } else {
        eprintln!("✓ {}", message);
    }
}

/// Print an info message to stderr.
///
/// ```no_run
/// use packle::ui::info;
///
/// info("Bundling...");
/// ```
pub fn info(message: &str) {
    if is_quiet() {
        return;
    }
    if colors_enabled() {
        eprintln!("{} {}", "ℹ".blue().bold(), message.blue());
    } else {
        eprintln!("ℹ {}", message);
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {}", message);
    }
}

/// Print an error message to stderr.
///
/// ```no_run
/// use packle::ui::error;
///
/// error("esbuild reported errors for public");
/// ```
pub fn error(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    } else {
        eprintln!("✗ {}", message);
    }
}

/// Print a dimmed, indented detail line to stderr.
pub fn hint(message: &str) {
    if is_quiet() {
        return;
    }
    if colors_enabled() {
        eprintln!("  {}", message.dimmed());
    } else {
        eprintln!("  {}", message);
    }
}
