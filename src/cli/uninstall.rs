//! The `uninstall` command.

use crate::config::Config;
use crate::lifecycle::Coordinator;
use crate::lifecycle::prompt::TerminalPrompter;
use crate::utils::platform;
use anyhow::Result;
use clap::Parser;

/// Command-line arguments for `orbitup uninstall`.
///
/// Removes the artifact, icon, and menu entry; the install directory is
/// removed only if it ends up empty. Reports not-installed (and exits
/// successfully) when there is nothing to remove.
#[derive(Parser, Debug)]
pub struct UninstallCommand {}

impl UninstallCommand {
    /// Execute the uninstall command.
    pub async fn execute(self, config: &Config) -> Result<()> {
        let prompter = TerminalPrompter;
        Coordinator::new(config, &prompter, platform::stdin_is_interactive())
            .uninstall()
            .await
    }
}
