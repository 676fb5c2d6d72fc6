//! Installation-state inspection.
//!
//! The filesystem is the source of truth: an installation is identified by
//! the existence of three fixed paths (artifact, icon, desktop entry). This
//! module provides the single query that derives [`InstallState`] from
//! those paths so no caller re-implements existence checks ad hoc.
//!
//! The three paths are expected to either all exist (installed) or none
//! exist (not installed). Anything in between is surfaced as
//! [`InstallState::Partial`] rather than silently folded into one of the
//! two healthy states; the lifecycle coordinator decides how to repair it.

use crate::config::Config;
use std::fmt;

/// Installation state derived from the three tracked paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    /// None of the tracked paths exist.
    Absent,
    /// All three tracked paths exist.
    Installed,
    /// Some, but not all, of the tracked paths exist.
    Partial,
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "not installed"),
            Self::Installed => write!(f, "installed"),
            Self::Partial => write!(f, "partially installed"),
        }
    }
}

impl InstallState {
    /// Whether install/update flows should treat the application as present.
    ///
    /// The artifact path is the authoritative signal for install/update
    /// decisions, so this is *not* derivable from the state alone; see
    /// [`Config::artifact_installed`]. This helper only answers whether
    /// uninstall has anything to remove ("any exists").
    pub fn anything_present(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Inspect the filesystem and classify the current installation.
pub fn inspect(config: &Config) -> InstallState {
    let present = [
        config.artifact_path.exists(),
        config.icon_path.exists(),
        config.desktop_entry_path.exists(),
    ];

    match present.iter().filter(|p| **p).count() {
        0 => InstallState::Absent,
        3 => InstallState::Installed,
        _ => InstallState::Partial,
    }
}
