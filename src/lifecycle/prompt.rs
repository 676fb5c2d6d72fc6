//! Interactive input, behind an injected abstraction.
//!
//! The coordinator never talks to a terminal directly: everything it needs
//! from the user goes through the [`Prompter`] trait, so the lifecycle
//! logic is testable with a scripted implementation. The real
//! implementation, [`TerminalPrompter`], renders `inquire` prompts.

use super::{AcquisitionMode, LifecycleAction};
use anyhow::{Context, Result};
use inquire::{Confirm, Select, Text};
use std::path::PathBuf;

/// Source of the user decisions the lifecycle flows need.
pub trait Prompter {
    /// Pick the lifecycle action from the top-level menu.
    fn choose_action(&self) -> Result<LifecycleAction>;

    /// Pick the artifact acquisition mode.
    fn choose_mode(&self) -> Result<AcquisitionMode>;

    /// Ask for a local artifact path (manual mode).
    fn manual_path(&self) -> Result<PathBuf>;

    /// Offer the single manual-path retry after a failed auto-download.
    ///
    /// `None` means the user declined and the original failure stands.
    fn manual_fallback(&self) -> Result<Option<PathBuf>>;
}

/// Terminal-backed prompter.
pub struct TerminalPrompter;

const ACTION_CHOICES: [&str; 3] = ["Install", "Update", "Uninstall"];
const MODE_CHOICES: [&str; 2] = ["Download the latest release", "Use a local file"];

impl Prompter for TerminalPrompter {
    fn choose_action(&self) -> Result<LifecycleAction> {
        let choice = Select::new("What would you like to do?", ACTION_CHOICES.to_vec())
            .prompt()
            .context("no action selected")?;
        Ok(match choice {
            "Install" => LifecycleAction::Install,
            "Update" => LifecycleAction::Update,
            _ => LifecycleAction::Uninstall,
        })
    }

    fn choose_mode(&self) -> Result<AcquisitionMode> {
        let choice = Select::new("How should the artifact be obtained?", MODE_CHOICES.to_vec())
            .prompt()
            .context("no acquisition mode selected")?;
        Ok(if choice == MODE_CHOICES[0] {
            AcquisitionMode::Auto
        } else {
            AcquisitionMode::Manual
        })
    }

    fn manual_path(&self) -> Result<PathBuf> {
        let raw = Text::new("Path to the artifact:").prompt().context("no path entered")?;
        Ok(expand_path(&raw))
    }

    fn manual_fallback(&self) -> Result<Option<PathBuf>> {
        let retry = Confirm::new("Download failed. Use a local file instead?")
            .with_default(false)
            .prompt()
            .context("no answer to the fallback prompt")?;
        if retry { self.manual_path().map(Some) } else { Ok(None) }
    }
}

/// Tilde-expand a user-entered path.
///
/// The path is otherwise unvalidated here; a bad path fails naturally at
/// the move step.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}
