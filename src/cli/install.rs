//! The `install` command.

use crate::config::Config;
use crate::lifecycle::Coordinator;
use crate::lifecycle::prompt::TerminalPrompter;
use crate::utils::platform;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for `orbitup install`.
///
/// The acquisition mode can be fixed up front (`--from`, `--auto`); with
/// neither flag an interactive session is asked, and a scripted one
/// defaults to auto-download.
///
/// # Examples
///
/// ```bash
/// orbitup install                 # prompt for the acquisition mode
/// orbitup install --auto          # download from the release API
/// orbitup install --from ./orbit.AppImage
/// ```
#[derive(Parser, Debug)]
pub struct InstallCommand {
    /// Install from a local artifact instead of downloading.
    ///
    /// The path is not validated up front; an unusable path fails at the
    /// move step.
    #[arg(long, value_name = "PATH", conflicts_with = "auto")]
    from: Option<PathBuf>,

    /// Download from the release API without prompting.
    #[arg(long)]
    auto: bool,
}

impl InstallCommand {
    /// Execute the install command.
    pub async fn execute(self, config: &Config) -> Result<()> {
        let acquisition = super::acquisition_from_flags(self.from, self.auto);
        let prompter = TerminalPrompter;
        Coordinator::new(config, &prompter, platform::stdin_is_interactive())
            .install(acquisition)
            .await
    }
}
