//! The `status` command.

use crate::config::Config;
use crate::constants;
use crate::core::state::inspect;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

/// Command-line arguments for `orbitup status`.
///
/// Reports the installation state derived from the three tracked paths.
/// Unlike install/update eligibility (which only the artifact decides),
/// this surfaces partial installations explicitly, listing which pieces
/// are present and which are missing.
#[derive(Parser, Debug)]
pub struct StatusCommand {}

impl StatusCommand {
    /// Execute the status command.
    pub fn execute(self, config: &Config) -> Result<()> {
        let state = inspect(config);
        println!("{} is {}", constants::APP_DISPLAY_NAME, state.to_string().bold());
        print_path("artifact", &config.artifact_path);
        print_path("icon", &config.icon_path);
        print_path("desktop entry", &config.desktop_entry_path);
        Ok(())
    }
}

fn print_path(label: &str, path: &Path) {
    let presence = if path.exists() {
        "present".green()
    } else {
        "missing".red()
    };
    println!("  {label:<14} {} ({presence})", path.display());
}
