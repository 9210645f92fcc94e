//! Command-line interface for oss-notice.
//!
//! The binary acts as a minimal build host: it feeds files to the license
//! collector as if a bundler had loaded them, then runs the build-end hook.
//! This makes the report available to builds that have no plugin system of
//! their own, and to CI jobs that only want the third-party notice.
//!
//! # Available Commands
//!
//! - `report` - Observe files (directories are walked) and write the report
//! - `banner` - Print the banner for the package in the working directory
//!
//! # Example
//!
//! ```bash
//! # Write dist/dependencies.txt for everything under node_modules
//! oss-notice report node_modules --outdir dist
//!
//! # Only the files a bundler actually emitted, as JSON
//! oss-notice report $(cat build/inputs.txt) --options oss-notice.toml
//!
//! # Show the banner
//! oss-notice banner
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Suppress all output except errors
//! - `--options` - Options file (defaults to `oss-notice.toml` in the working directory, if present)
//! - `--working-dir` - Directory the build runs in (defaults to the current directory)

mod banner;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::{Options, parse_config};
use crate::constants::DEFAULT_OPTIONS_FILE;

pub use banner::BannerCommand;
pub use report::ReportCommand;

/// Runtime configuration for CLI execution.
///
/// Built from the global flags by [`Cli::build_config`] and handed to every
/// subcommand, so commands never read process-wide state themselves.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` leaves logging off
    pub log_level: Option<String>,
    /// Suppress normal output
    pub quiet: bool,
    /// Explicit options file
    pub options_path: Option<PathBuf>,
    /// Absolute working directory of the build
    pub working_dir: PathBuf,
}

impl CliConfig {
    /// Load the options file.
    ///
    /// An explicit `--options` path must exist. Without one,
    /// `oss-notice.toml` in the working directory is used when present and
    /// defaults otherwise.
    pub fn load_options(&self) -> Result<Options> {
        if let Some(path) = &self.options_path {
            let path = self.working_dir.join(path);
            return parse_config(&path);
        }

        let default_path = self.working_dir.join(DEFAULT_OPTIONS_FILE);
        if default_path.is_file() {
            tracing::debug!("Using options file {}", default_path.display());
            return parse_config(&default_path);
        }
        Ok(Options::default())
    }

    /// Install the global tracing subscriber on stderr.
    ///
    /// `RUST_LOG` takes precedence over the verbosity flags.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Collect third-party license notices for a JavaScript build.
#[derive(Parser)]
#[command(
    name = "oss-notice",
    about = "Collect third-party license notices for a JavaScript build",
    version,
    long_about = "oss-notice maps build input files to their owning packages, renders a license banner \
                  for the root package, and writes a third-party license report."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Options file (TOML).
    #[arg(long, global = true, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Directory the build runs in; the root package is searched from here.
    #[arg(long, global = true, value_name = "DIR")]
    working_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Observe files and write the third-party report.
    ///
    /// See [`ReportCommand`] for options.
    Report(ReportCommand),

    /// Print the rendered banner for the root package.
    ///
    /// See [`BannerCommand`] for options.
    Banner(BannerCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config()?;
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the global flags.
    ///
    /// - **Verbose mode**: `debug` for this crate
    /// - **Quiet mode**: logging off
    /// - **Default mode**: warnings only
    pub fn build_config(&self) -> Result<CliConfig> {
        let log_level = if self.verbose {
            Some("oss_notice=debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let working_dir = absolute_from(&cwd, self.working_dir.as_deref());

        Ok(CliConfig {
            log_level,
            quiet: self.quiet,
            options_path: self.options.clone(),
            working_dir,
        })
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Report(cmd) => cmd.execute(&config).await,
            Commands::Banner(cmd) => cmd.execute(&config).await,
        }
    }
}

/// `path` resolved against `base`; `base` itself when `path` is absent.
fn absolute_from(base: &Path, path: Option<&Path>) -> PathBuf {
    match path {
        Some(path) => crate::utils::normalize_path(&base.join(path)),
        None => base.to_path_buf(),
    }
}
