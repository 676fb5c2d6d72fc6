//! orbitup CLI entry point
//!
//! This is the executable for the Orbit desktop application lifecycle
//! manager. It handles command-line argument parsing, error display, and
//! command execution.
//!
//! Supported commands:
//! - `install` - Download (or take a local copy of) the artifact and install it
//! - `update` - Replace the installed artifact with a newly acquired one
//! - `uninstall` - Remove the artifact, icon, and desktop entry
//! - `status` - Report the current installation state
//!
//! Running without a subcommand presents an interactive action menu.

use anyhow::Result;
use clap::Parser;
use orbitup::cli;
use orbitup::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to a user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
