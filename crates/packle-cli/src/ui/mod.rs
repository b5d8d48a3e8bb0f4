//! Terminal UI utilities for status lines and spinners.
//!
//! Handles environment detection (CI, TTY) and degrades to plain lines when
//! terminal features aren't available.
//!
//! # Examples
//!
//! ```no_run
//! use packle::ui;
//!
//! ui::init_colors(false);
//! ui::info("Bundling...");
//! let spinner = ui::Spinner::new("Running esbuild...");
//! spinner.clear();
//! ui::success("Bundled!");
//! ```

mod format;
mod messages;
mod spinner;

pub use format::{display_relative, format_duration};
pub use messages::{error, hint, info, success, warning};
pub use spinner::Spinner;

use std::sync::atomic::{AtomicBool, Ordering};

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise falls back to terminal
/// detection on stderr.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Whether spinners may animate on stderr.
pub fn should_animate() -> bool {
    console::user_attended_stderr() && !is_ci()
}

static COLORS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Initialize color support.
///
/// `--no-color`, `NO_COLOR` and a non-TTY stderr all switch status lines to
/// plain text.
pub fn init_colors(no_color: bool) {
    COLORS_ENABLED.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS_ENABLED.load(Ordering::Relaxed)
}

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress success, info and detail lines. Warnings and errors still print.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub(crate) fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}
