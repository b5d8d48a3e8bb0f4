//! Logging infrastructure for the Packle CLI.
//!
//! Structured logging on top of `tracing`. User-facing status lines go
//! through [`crate::ui`]; this layer carries the diagnostic detail (resolved
//! paths, dropped entries, tool command lines, watch registrations).
//!
//! # Example
//!
//! ```rust,no_run
//! use packle::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Starting build");
//! debug!("Resolved entry: {}", "src/index.ts");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "packle=debug";
const QUIET_FILTER: &str = "packle=error";
const DEFAULT_FILTER: &str = "packle=info";

/// Initialize the tracing subscriber.
///
/// Must be called once, before any logging occurs.
///
/// The filter is picked in this order:
/// 1. `--verbose`: DEBUG for packle
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`
/// 4. INFO for packle
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(select_filter(verbose, quiet), no_color);
}

/// Initialize logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so these
    // only exercise filter construction.

    #[test]
    fn test_verbose_filter_wins_over_quiet() {
        let filter = select_filter(true, true);
        assert_eq!(filter.to_string(), VERBOSE_FILTER);
    }

    #[test]
    fn test_quiet_filter() {
        let filter = select_filter(false, true);
        assert_eq!(filter.to_string(), QUIET_FILTER);
    }
}
