//! Spinner shown while an external tool runs.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner for a single tool invocation.
///
/// Hidden when stderr is not attended, in CI, or with `--quiet`.
///
/// # Examples
///
/// ```no_run
/// use packle::ui::Spinner;
///
/// let spinner = Spinner::new("Running esbuild...");
/// // Do work...
/// spinner.clear();
/// ```
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create and start a new spinner.
    pub fn new(message: &str) -> Self {
        if !super::should_animate() || super::is_quiet() {
            return Self {
                pb: ProgressBar::hidden(),
            };
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_strings(&["◐", "◓", "◑", "◒", "●"]));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Remove the spinner line, leaving no trace.
    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let spinner = Spinner::new("Running esbuild...");
        spinner.clear();
    }

    #[test]
    fn test_spinner_dropped_unfinished() {
        let _spinner = Spinner::new("Dropped");
    }
}
