//! Command-line interface definition for Packle.
//!
//! Packle has no subcommands: every run builds the project in the working
//! directory once, then optionally keeps watching it.
//!
//! - `packle` - development build
//! - `packle -p` - production build (minified, `NODE_ENV=production`)
//! - `packle -w` - build, then rebuild on changes

mod tests;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use validation::parse_project_dir;

use crate::env::Mode;

/// Packle - a minimal front-end asset bundler
#[derive(Parser, Debug)]
#[command(
    name = "packle",
    version,
    about = "A minimal front-end asset bundler",
    long_about = "Packle bundles JavaScript/TypeScript entries, compiles stylesheets and copies\n\
                  static files into an output directory. Configure it with an optional\n\
                  packle.config.json; inject build-time constants with a .env file."
)]
pub struct Cli {
    /// Production build
    ///
    /// Minifies scripts and stylesheets and sets process.env.NODE_ENV to
    /// "production" in bundled code.
    #[arg(short, long)]
    pub production: bool,

    /// Watch mode
    ///
    /// After the first build, rebuild whenever the config, package.json,
    /// .env or anything under src/ changes. Press p to rebuild, q to quit.
    #[arg(short, long)]
    pub watch: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long, value_name = "DIR", value_parser = parse_project_dir)]
    pub cwd: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        Mode::from_production_flag(self.production)
    }
}
