//! oss-notice CLI entry point
//!
//! This is the standalone host for the license collector. It handles
//! command-line argument parsing, error display, and command execution.
//!
//! Commands:
//! - `report` - Observe build inputs and write the third-party report
//! - `banner` - Print the banner for the root package

use anyhow::Result;
use clap::Parser;
use oss_notice::cli;
use oss_notice::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
