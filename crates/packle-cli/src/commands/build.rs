//! One full build with user-facing status lines.
//!
//! Shared by the single-shot run and every rebuild in watch mode.

use crate::build::{BuildSummary, Builder};
use crate::env::Mode;
use crate::error::Result;
use crate::ui;
use std::time::Instant;

/// Build every configured entry, reporting progress.
///
/// Config and `.env` are read fresh from disk. Tool failures are counted in
/// the returned summary; the run still ends with "Bundled!".
///
/// # Errors
///
/// Malformed config or `.env`, tools that cannot be started, stylesheet
/// errors and filesystem failures.
pub async fn run_build(builder: &Builder, mode: Mode) -> Result<BuildSummary> {
    let start = Instant::now();
    ui::info(&format!("Bundling... ({})", mode.as_str()));

    let summary = builder.build(mode).await?;

    let elapsed = ui::format_duration(start.elapsed());
    tracing::debug!(
        "Built {} entries, {} files copied, {} stylesheets",
        summary.entries,
        summary.copied,
        summary.stylesheets
    );
    ui::success(&format!("Bundled! in {}", elapsed));

    if summary.has_failures() {
        ui::warning(&failure_note(&summary));
    }

    Ok(summary)
}

fn failure_note(summary: &BuildSummary) -> String {
    let mut parts = Vec::new();
    if summary.bundle_failures > 0 {
        parts.push(plural(summary.bundle_failures, "bundle step", "bundle steps"));
    }
    if summary.type_check_failures > 0 {
        parts.push(plural(summary.type_check_failures, "type check", "type checks"));
    }
    format!("{} failed, see output above", parts.join(" and "))
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}
