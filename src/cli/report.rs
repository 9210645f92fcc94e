//! `oss-notice report`: observe files and write the third-party report.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::CliConfig;
use crate::constants::DEFAULT_OBSERVE_CONCURRENCY;
use crate::plugin::{BuildOptions, LicensePlugin, ReportOutcome};
use crate::utils::fs::OsFileSystem;
use crate::version::VersionOrdering;

/// Observe build inputs and write the third-party report.
#[derive(Args, Debug)]
pub struct ReportCommand {
    /// Files the build loaded; directories are walked recursively
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Build output directory; relative report paths land here
    #[arg(long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Include packages marked `"private": true`
    #[arg(long)]
    pub include_private: bool,

    /// Report file, overriding `third_party.output.file`
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Version comparison for duplicate packages: `lexical` or `semver`
    #[arg(long, value_name = "ORDERING")]
    pub version_ordering: Option<VersionOrdering>,

    /// Maximum number of files observed concurrently
    #[arg(short = 'j', long, value_name = "N", default_value_t = DEFAULT_OBSERVE_CONCURRENCY)]
    pub max_parallel: usize,
}

impl ReportCommand {
    /// Run the command.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let mut options = config.load_options()?;
        if self.include_private {
            options = options.with_include_private(true);
        }
        if let Some(output) = &self.output {
            options = options.with_output_file(output);
        }
        if let Some(ordering) = self.version_ordering {
            options = options.with_version_ordering(ordering);
        }

        let plugin = LicensePlugin::new(options, Arc::new(OsFileSystem));
        let mut build = BuildOptions::new(&config.working_dir);
        if let Some(outdir) = &self.outdir {
            build = build.with_outdir(outdir);
        }

        let session = plugin.setup(&mut build)?;

        let files = expand_paths(&config.working_dir, &self.paths)?;
        tracing::debug!("Observing {} files", files.len());

        let results: Vec<Result<()>> = stream::iter(files)
            .map(|file| {
                let session = &session;
                async move { session.on_load(&file).await.with_context(|| format!("Failed to observe {}", file.display())) }
            })
            .buffer_unordered(self.max_parallel.max(1))
            .collect()
            .await;
        results.into_iter().collect::<Result<Vec<()>>>()?;

        let outcome = session.on_end(&build).await?;
        if !config.quiet {
            print_outcome(&outcome);
        }
        Ok(())
    }
}

/// Resolve `paths` against `working_dir`, walking directories.
///
/// Symlinks are not followed while walking, so linked workspace packages are
/// observed once, through their real location.
fn expand_paths(working_dir: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let path = working_dir.join(path);
        if path.is_dir() {
            for entry in WalkDir::new(&path) {
                let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
        } else if path.exists() {
            files.push(path);
        } else {
            anyhow::bail!("Input path does not exist: {}", path.display());
        }
    }
    Ok(files)
}

fn print_outcome(outcome: &ReportOutcome) {
    if outcome.written {
        println!(
            "{} {} third-party package(s) to {}",
            "Wrote".green().bold(),
            outcome.dependency_count,
            outcome.path.display()
        );
    } else {
        println!("{}", "Nothing to report".yellow());
    }
}
