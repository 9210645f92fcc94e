//! `oss-notice banner`: print the banner the build would receive.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use super::CliConfig;
use crate::plugin::{BuildOptions, LicensePlugin};
use crate::utils::fs::OsFileSystem;

/// Print the rendered banner for the root package.
#[derive(Args, Debug)]
pub struct BannerCommand {
    /// Banner the build already carries; the rendered banner is appended to it
    #[arg(long, value_name = "TEXT")]
    pub prepend: Option<String>,
}

impl BannerCommand {
    /// Run the command.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let banner = self.render(config)?;
        if !config.quiet {
            println!("{banner}");
        }
        Ok(())
    }

    fn render(self, config: &CliConfig) -> Result<String> {
        let options = config.load_options()?;
        let plugin = LicensePlugin::new(options, Arc::new(OsFileSystem));

        let mut build = BuildOptions::new(&config.working_dir);
        build.banner = self.prepend;
        // The session is dropped unused, so no report is written.
        plugin.setup(&mut build)?;

        Ok(build.banner.unwrap_or_default())
    }
}
