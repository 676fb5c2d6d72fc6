//! Filesystem installation of the application.
//!
//! The installer owns the three fixed destination paths (artifact, icon,
//! desktop entry). Install is an ordered list of steps, each a precondition
//! for the next; a failed step aborts with a distinct message and earlier
//! steps are **not** rolled back — the inconsistent end state is left for
//! the user (or a later `install`/`uninstall`) to resolve.
//!
//! Every step declares a compensating action. Compensation is not invoked
//! automatically on failure (transactional rollback is a deliberate
//! non-feature), but uninstall is exactly the compensations replayed in
//! reverse order, each tolerant of an already-absent target.

pub mod desktop;

use crate::config::Config;
use crate::constants;
use crate::core::error::OrbitupError;
use crate::core::state::{InstallState, inspect};
use crate::utils::fs::{
    atomic_write, ensure_dir, move_file, remove_dir_if_empty, remove_file_if_exists,
    set_executable,
};
use crate::utils::platform;
use anyhow::Result;
use desktop::DesktopEntry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// One step of the install flow, with its compensating action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InstallStep {
    CreateInstallDir,
    MoveArtifact,
    SetExecutable,
    CopyIcon,
    WriteDesktopEntry,
}

impl InstallStep {
    /// The steps in execution order.
    const ORDER: [Self; 5] = [
        Self::CreateInstallDir,
        Self::MoveArtifact,
        Self::SetExecutable,
        Self::CopyIcon,
        Self::WriteDesktopEntry,
    ];

    /// Operation label used in failure messages.
    fn operation(self) -> &'static str {
        match self {
            Self::CreateInstallDir => "create install directory",
            Self::MoveArtifact => "move artifact into place",
            Self::SetExecutable => "set executable permission",
            Self::CopyIcon => "copy icon into install directory",
            Self::WriteDesktopEntry => "write desktop entry",
        }
    }

    /// The path reported when this step fails.
    fn target(self, config: &Config) -> PathBuf {
        match self {
            Self::CreateInstallDir => config.install_dir.clone(),
            Self::MoveArtifact | Self::SetExecutable => config.artifact_path.clone(),
            Self::CopyIcon => config.icon_path.clone(),
            Self::WriteDesktopEntry => config.desktop_entry_path.clone(),
        }
    }

    /// Apply the step.
    fn apply(self, config: &Config, artifact_src: &Path, icon_src: &Path) -> io::Result<()> {
        match self {
            Self::CreateInstallDir => ensure_dir(&config.install_dir),
            Self::MoveArtifact => move_file(artifact_src, &config.artifact_path),
            Self::SetExecutable => set_executable(&config.artifact_path),
            Self::CopyIcon => fs::copy(icon_src, &config.icon_path).map(|_| ()),
            Self::WriteDesktopEntry => {
                let entry = DesktopEntry::for_config(config);
                atomic_write(&config.desktop_entry_path, entry.render().as_bytes())
            }
        }
    }

    /// Undo the step, tolerating an already-absent target.
    ///
    /// `SetExecutable` has nothing to undo: its compensation rides on the
    /// artifact removal.
    fn compensate(self, config: &Config) -> io::Result<()> {
        match self {
            Self::CreateInstallDir => {
                remove_dir_if_empty(&config.install_dir);
                Ok(())
            }
            Self::MoveArtifact => remove_file_if_exists(&config.artifact_path).map(|_| ()),
            Self::SetExecutable => Ok(()),
            Self::CopyIcon => remove_file_if_exists(&config.icon_path).map(|_| ()),
            Self::WriteDesktopEntry => {
                remove_file_if_exists(&config.desktop_entry_path).map(|_| ())
            }
        }
    }
}

/// Installs, updates, and removes the application's filesystem footprint.
pub struct Installer<'a> {
    config: &'a Config,
}

impl<'a> Installer<'a> {
    /// Create an installer over the configured layout.
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Classify the current installation state.
    pub fn inspect(&self) -> InstallState {
        inspect(self.config)
    }

    /// Run the full install flow from a staged artifact and an icon source.
    ///
    /// The artifact is moved (not copied); the icon is copied. Each step
    /// failure is fatal and reported with the step's operation label.
    ///
    /// # Errors
    ///
    /// - [`OrbitupError::AlreadyInstalled`] when the artifact path already
    ///   exists (checked before any mutation).
    /// - [`OrbitupError::FileSystem`] when a step fails.
    pub async fn install(&self, artifact_src: &Path, icon_src: &Path) -> Result<()> {
        if self.config.artifact_installed() {
            return Err(
                OrbitupError::AlreadyInstalled(constants::APP_DISPLAY_NAME.to_string()).into()
            );
        }

        for step in InstallStep::ORDER {
            debug!(step = step.operation(), "applying install step");
            step.apply(self.config, artifact_src, icon_src).map_err(|e| {
                OrbitupError::FileSystem {
                    operation: step.operation().to_string(),
                    path: step.target(self.config),
                    source: e,
                }
            })?;
        }

        self.refresh_desktop_database().await;
        info!(artifact = %self.config.artifact_path.display(), "installation complete");
        Ok(())
    }

    /// Replace the installed artifact, leaving icon and desktop entry
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`OrbitupError::FileSystem`] when removal, move, or permission
    /// setting fails.
    pub async fn update_artifact(&self, artifact_src: &Path) -> Result<()> {
        remove_file_if_exists(&self.config.artifact_path).map_err(|e| {
            OrbitupError::FileSystem {
                operation: "remove previous artifact".to_string(),
                path: self.config.artifact_path.clone(),
                source: e,
            }
        })?;

        move_file(artifact_src, &self.config.artifact_path).map_err(|e| {
            OrbitupError::FileSystem {
                operation: InstallStep::MoveArtifact.operation().to_string(),
                path: self.config.artifact_path.clone(),
                source: e,
            }
        })?;
        set_executable(&self.config.artifact_path).map_err(|e| OrbitupError::FileSystem {
            operation: InstallStep::SetExecutable.operation().to_string(),
            path: self.config.artifact_path.clone(),
            source: e,
        })?;

        info!(artifact = %self.config.artifact_path.display(), "artifact updated");
        Ok(())
    }

    /// Remove the installed artifact, icon, and desktop entry.
    ///
    /// Each removal is independent and tolerant of an absent target; the
    /// install directory itself is removed only if it ends up empty.
    ///
    /// # Errors
    ///
    /// - [`OrbitupError::NotInstalled`] when none of the tracked paths
    ///   exist (nothing is mutated).
    /// - [`OrbitupError::FileSystem`] when a removal fails for a reason
    ///   other than absence.
    pub async fn uninstall(&self) -> Result<()> {
        if !self.inspect().anything_present() {
            return Err(OrbitupError::NotInstalled(constants::APP_DISPLAY_NAME.to_string()).into());
        }

        // Compensations in reverse step order: entry, icon, artifact, dir.
        for step in InstallStep::ORDER.iter().rev() {
            debug!(step = step.operation(), "compensating install step");
            step.compensate(self.config).map_err(|e| OrbitupError::FileSystem {
                operation: format!("remove ({})", step.operation()),
                path: step.target(self.config),
                source: e,
            })?;
        }

        self.refresh_desktop_database().await;
        info!("uninstallation complete");
        Ok(())
    }

    /// Best-effort refresh of the desktop menu database.
    ///
    /// Failure is logged, never fatal: the three tracked paths are already
    /// in their final state and most environments pick the change up on
    /// their own.
    async fn refresh_desktop_database(&self) {
        const TOOL: &str = "update-desktop-database";
        if !platform::command_exists(TOOL) {
            debug!("{TOOL} not available, skipping desktop database refresh");
            return;
        }

        match Command::new(TOOL).arg(&self.config.applications_dir).output().await {
            Ok(output) if output.status.success() => {
                debug!("desktop database refreshed");
            }
            Ok(output) => {
                warn!(stderr = %String::from_utf8_lossy(&output.stderr), "desktop database refresh failed");
            }
            Err(e) => warn!("could not run {TOOL}: {e}"),
        }
    }
}
