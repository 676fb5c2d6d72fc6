//! The `update` command.

use crate::config::Config;
use crate::lifecycle::Coordinator;
use crate::lifecycle::prompt::TerminalPrompter;
use crate::utils::platform;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for `orbitup update`.
///
/// Shares the acquisition flags with `install`; the icon and the menu
/// entry are never touched by an update.
///
/// # Examples
///
/// ```bash
/// orbitup update --auto
/// orbitup update --from ~/Downloads/orbit.AppImage
/// ```
#[derive(Parser, Debug)]
pub struct UpdateCommand {
    /// Update from a local artifact instead of downloading.
    #[arg(long, value_name = "PATH", conflicts_with = "auto")]
    from: Option<PathBuf>,

    /// Download from the release API without prompting.
    #[arg(long)]
    auto: bool,
}

impl UpdateCommand {
    /// Execute the update command.
    pub async fn execute(self, config: &Config) -> Result<()> {
        let acquisition = super::acquisition_from_flags(self.from, self.auto);
        let prompter = TerminalPrompter;
        Coordinator::new(config, &prompter, platform::stdin_is_interactive())
            .update(acquisition)
            .await
    }
}
