//! Dependency resolution for external executables.
//!
//! orbitup shells out for exactly one concern: desktop-menu integration
//! (`update-desktop-database`, shipped by `desktop-file-utils`). Network
//! transfer and JSON handling are native, so nothing else is required at
//! runtime.
//!
//! The resolver checks every configured executable for presence on the
//! search path and, if any are missing, installs the missing subset in one
//! batch package-manager call. A failed package-manager invocation is fatal
//! and aborts the whole lifecycle transition; there is no
//! partial-dependency continuation.

use crate::config::Config;
use crate::constants;
use crate::core::error::OrbitupError;
use crate::utils::platform;
use anyhow::Result;
use colored::Colorize;
use tokio::process::Command;
use tracing::{debug, info};

/// Ensures required external executables are invocable.
pub struct DependencyResolver<'a> {
    config: &'a Config,
}

impl<'a> DependencyResolver<'a> {
    /// Create a resolver over the configured required-tool list.
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Check the configured executables and install any missing ones.
    ///
    /// Side effect: mutates system package state when something is missing.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitupError::MissingDependency`] when the package-manager
    /// invocation cannot be started or exits unsuccessfully.
    pub async fn ensure_tools(&self) -> Result<()> {
        let missing: Vec<&str> = self
            .config
            .required_tools
            .iter()
            .map(String::as_str)
            .filter(|tool| !platform::command_exists(tool))
            .collect();

        if missing.is_empty() {
            debug!("all required tools present");
            return Ok(());
        }

        let tools = missing.join(", ");
        let packages: Vec<&str> = missing.iter().map(|t| constants::tool_package(t)).collect();
        info!(?packages, "installing missing tools");
        println!("{}", format!("Installing missing tools: {tools}").cyan());

        let output = Command::new(constants::PACKAGE_MANAGER)
            .arg("install")
            .arg("-y")
            .args(&packages)
            .output()
            .await
            .map_err(|e| OrbitupError::MissingDependency {
                tools: tools.clone(),
                stderr: format!("could not run {}: {e}", constants::PACKAGE_MANAGER),
            })?;

        if !output.status.success() {
            return Err(OrbitupError::MissingDependency {
                tools,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        Ok(())
    }
}
