//! Shared test environment for the integration suites.
//!
//! Every test runs the real `orbitup` binary against a disposable
//! installation layout: all tracked paths are redirected into a temp
//! directory through the `ORBITUP_*` environment variables, the user
//! config file is pointed at a nonexistent path, and the required-tool
//! list is emptied so no test ever invokes the package manager.

// Not every suite uses every accessor.
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnvironment {
    root: TempDir,
}

impl TestEnvironment {
    /// A fresh, empty layout without an icon source.
    pub fn new() -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        Self { root }
    }

    /// A fresh layout with the icon staged at its expected source path.
    pub fn with_icon() -> Self {
        let env = Self::new();
        let icon = env.icon_source();
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(&icon, b"\x89PNG icon bytes").unwrap();
        env
    }

    /// Write a local artifact to hand to `--from`.
    pub fn stage_artifact(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// The real binary with the environment fully redirected.
    pub fn orbitup_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("orbitup").unwrap();
        cmd.env("HOME", self.root.path())
            .env("ORBITUP_CONFIG", self.root.path().join("no-such-config.toml"))
            .env("ORBITUP_INSTALL_DIR", self.install_dir())
            .env("ORBITUP_APPLICATIONS_DIR", self.applications_dir())
            .env("ORBITUP_STAGING_DIR", self.root.path().join("staging"))
            .env("ORBITUP_ICON_SOURCE", self.icon_source())
            .env("ORBITUP_REQUIRED_TOOLS", "")
            .env("ORBITUP_NO_PROGRESS", "1");
        cmd
    }

    pub fn install_dir(&self) -> PathBuf {
        self.root.path().join("install")
    }

    pub fn applications_dir(&self) -> PathBuf {
        self.root.path().join("applications")
    }

    pub fn icon_source(&self) -> PathBuf {
        self.root.path().join("tools").join("orbit.png")
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.install_dir().join("orbit.AppImage")
    }

    pub fn icon_path(&self) -> PathBuf {
        self.install_dir().join("orbit.png")
    }

    pub fn desktop_entry_path(&self) -> PathBuf {
        self.applications_dir().join("orbit.desktop")
    }
}
