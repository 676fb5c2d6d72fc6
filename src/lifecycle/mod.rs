//! The lifecycle coordinator.
//!
//! This is the decision layer: it inspects the current installation state,
//! rejects state-mismatched commands informationally (success exit, no
//! mutation), runs the artifact-acquisition sub-flow shared by install and
//! update, and hands the acquired artifact to the installer.
//!
//! State rules:
//! - the artifact path is the authoritative signal for install/update
//!   eligibility;
//! - "anything exists" is the signal for uninstall eligibility;
//! - a partial installation is surfaced with a warning naming the
//!   inconsistency, then handled by the artifact rule above.

pub mod prompt;

use crate::config::Config;
use crate::constants;
use crate::core::error::OrbitupError;
use crate::core::state::InstallState;
use crate::fetcher::ArtifactFetcher;
use crate::installer::Installer;
use crate::resolver::DependencyResolver;
use anyhow::Result;
use colored::Colorize;
use prompt::Prompter;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A lifecycle transition requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Install the application (requires it to be absent).
    Install,
    /// Replace the installed artifact (requires it to be present).
    Update,
    /// Remove the installation.
    Uninstall,
}

/// How to obtain the artifact in the acquisition sub-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionMode {
    /// Resolve and download through the release API.
    Auto,
    /// Ask the user for a local file path.
    Manual,
}

/// Acquisition decision carried in from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// `--auto`: fetch from the release API without asking.
    Auto,
    /// `--from <path>`: use this local file without asking.
    Manual(PathBuf),
    /// No flag: ask through the prompter.
    Ask,
}

/// Coordinates install, update, and uninstall transitions.
pub struct Coordinator<'a> {
    config: &'a Config,
    prompter: &'a dyn Prompter,
    /// Whether fallback prompts may be offered after a failed download.
    interactive: bool,
}

impl<'a> Coordinator<'a> {
    /// Create a coordinator.
    ///
    /// `interactive` gates the manual-path retry after a failed
    /// auto-download; pass the result of a terminal check so scripted runs
    /// fail fast instead of hanging on a prompt.
    pub fn new(config: &'a Config, prompter: &'a dyn Prompter, interactive: bool) -> Self {
        Self { config, prompter, interactive }
    }

    /// Dispatch a lifecycle action.
    pub async fn run(&self, action: LifecycleAction, acquisition: Acquisition) -> Result<()> {
        match action {
            LifecycleAction::Install => self.install(acquisition).await,
            LifecycleAction::Update => self.update(acquisition).await,
            LifecycleAction::Uninstall => self.uninstall().await,
        }
    }

    /// `Absent -> Installed`.
    ///
    /// No-op (informational, success exit) when the artifact already
    /// exists. The icon precondition is checked before acquisition so no
    /// mutation — not even staging — happens without it.
    pub async fn install(&self, acquisition: Acquisition) -> Result<()> {
        let state = self.report_state();
        if self.config.artifact_installed() {
            let message = OrbitupError::AlreadyInstalled(constants::APP_DISPLAY_NAME.to_string());
            println!("{}", message.to_string().yellow());
            return Ok(());
        }

        if !self.config.icon_source.exists() {
            return Err(OrbitupError::MissingIcon { path: self.config.icon_source.clone() }.into());
        }

        DependencyResolver::new(self.config).ensure_tools().await?;
        let artifact = self.acquire(acquisition).await?;

        if state == InstallState::Partial {
            println!("{}", "Repairing the partial installation.".yellow());
        }

        Installer::new(self.config).install(&artifact, &self.config.icon_source).await?;
        println!(
            "{}",
            format!("{} installed to {}", constants::APP_DISPLAY_NAME, self.config.install_dir.display())
                .green()
        );
        Ok(())
    }

    /// `Installed -> Installed` with a fresh artifact.
    ///
    /// No-op (informational, success exit) when the artifact is absent.
    /// Icon and desktop entry are preserved untouched.
    pub async fn update(&self, acquisition: Acquisition) -> Result<()> {
        self.report_state();
        if !self.config.artifact_installed() {
            let message = OrbitupError::NotInstalled(constants::APP_DISPLAY_NAME.to_string());
            println!("{} Run `orbitup install` first.", message.to_string().yellow());
            return Ok(());
        }

        DependencyResolver::new(self.config).ensure_tools().await?;
        let artifact = self.acquire(acquisition).await?;

        Installer::new(self.config).update_artifact(&artifact).await?;
        println!("{}", format!("{} updated", constants::APP_DISPLAY_NAME).green());
        Ok(())
    }

    /// `Installed -> Absent`.
    ///
    /// No-op (informational, success exit) when nothing is installed.
    pub async fn uninstall(&self) -> Result<()> {
        self.report_state();
        match Installer::new(self.config).uninstall().await {
            Ok(()) => {
                println!("{}", format!("{} uninstalled", constants::APP_DISPLAY_NAME).green());
                Ok(())
            }
            Err(e) => match e.downcast_ref::<OrbitupError>() {
                Some(OrbitupError::NotInstalled(_)) => {
                    println!("{}", e.to_string().yellow());
                    Ok(())
                }
                _ => Err(e),
            },
        }
    }

    /// The acquisition sub-flow shared by install and update.
    ///
    /// Auto mode surfaces a failed fetch immediately unless an interactive
    /// session accepts the single manual-path retry.
    async fn acquire(&self, acquisition: Acquisition) -> Result<PathBuf> {
        let mode = match acquisition {
            Acquisition::Manual(path) => {
                debug!(path = %path.display(), "using supplied artifact path");
                return Ok(path);
            }
            Acquisition::Auto => AcquisitionMode::Auto,
            Acquisition::Ask => self.prompter.choose_mode()?,
        };

        match mode {
            AcquisitionMode::Manual => self.prompter.manual_path(),
            AcquisitionMode::Auto => {
                let fetcher = ArtifactFetcher::new(self.config)?;
                match fetcher.fetch().await {
                    Ok(result) => Ok(result.path),
                    Err(e) if self.interactive => {
                        warn!("auto-download failed: {e:#}");
                        eprintln!("{}", format!("Download failed: {e}").red());
                        match self.prompter.manual_fallback()? {
                            Some(path) => Ok(path),
                            None => Err(e),
                        }
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Print a warning for partial installations and return the state.
    fn report_state(&self) -> InstallState {
        let state = Installer::new(self.config).inspect();
        if state == InstallState::Partial {
            let missing: Vec<&str> = [
                ("artifact", self.config.artifact_path.exists()),
                ("icon", self.config.icon_path.exists()),
                ("desktop entry", self.config.desktop_entry_path.exists()),
            ]
            .iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect();
            warn!(?missing, "installation is partial");
            println!(
                "{}",
                format!("Warning: partial installation detected (missing: {}).", missing.join(", "))
                    .yellow()
            );
        }
        state
    }
}
