//! Command-line interface for orbitup.
//!
//! Each subcommand is implemented in its own module with its own argument
//! struct and execution logic. Running without a subcommand presents the
//! interactive action menu (install / update / uninstall); a refused or
//! failed prompt exits non-zero.
//!
//! # Global Options
//!
//! All commands support:
//! - `--verbose` - debug output
//! - `--quiet` - errors only
//! - `--no-progress` - disable the download progress bar (also honored via
//!   the `ORBITUP_NO_PROGRESS` environment variable)
//!
//! # Example
//!
//! ```bash
//! orbitup install --auto
//! orbitup update --from ~/Downloads/orbit.AppImage
//! orbitup --quiet uninstall
//! orbitup status
//! ```

mod install;
mod status;
mod uninstall;
mod update;

use crate::config::Config;
use crate::lifecycle::prompt::{Prompter, TerminalPrompter};
use crate::lifecycle::{Acquisition, Coordinator};
use crate::utils::platform;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global CLI flags.
///
/// Holds what would otherwise be scattered environment-variable writes, so
/// it is applied exactly once at the start of execution and is inspectable
/// in tests.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for the tracing filter; `None` preserves `RUST_LOG`.
    pub log_level: Option<String>,
    /// Whether to disable progress indicators.
    pub no_progress: bool,
}

impl CliConfig {
    /// Apply this configuration to the process environment and install the
    /// tracing subscriber.
    pub fn apply(&self) {
        if self.no_progress {
            // Read by utils::progress wherever a bar would be drawn.
            unsafe { std::env::set_var("ORBITUP_NO_PROGRESS", "1") };
        }

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        });
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .ok();
    }
}

/// Main CLI structure for orbitup.
#[derive(Parser)]
#[command(
    name = "orbitup",
    about = "Install, update, and uninstall the Orbit desktop application",
    version,
    author,
    long_about = "orbitup manages the lifecycle of the Orbit desktop application: it \
                  downloads the release artifact (or takes a local copy), installs it with \
                  its icon, registers the application-menu entry, and removes all of it on \
                  uninstall."
)]
pub struct Cli {
    /// The subcommand to execute; omitted, an interactive menu is shown.
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output for debugging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable the download progress bar.
    ///
    /// Also honored as the `ORBITUP_NO_PROGRESS` environment variable.
    #[arg(long, global = true)]
    no_progress: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Install the application.
    ///
    /// Acquires the artifact (release API download or a local file),
    /// installs it with the icon, and registers the menu entry. A no-op
    /// when already installed.
    Install(install::InstallCommand),

    /// Update the installed artifact.
    ///
    /// Acquires a new artifact the same way as install and replaces the
    /// installed one; icon and menu entry are preserved. A no-op when not
    /// installed.
    Update(update::UpdateCommand),

    /// Remove the artifact, icon, and menu entry.
    Uninstall(uninstall::UninstallCommand),

    /// Report the current installation state and tracked paths.
    Status(status::StatusCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        self.build_config().apply();
        let config = Config::load().await?;

        match self.command {
            Some(Commands::Install(cmd)) => cmd.execute(&config).await,
            Some(Commands::Update(cmd)) => cmd.execute(&config).await,
            Some(Commands::Uninstall(cmd)) => cmd.execute(&config).await,
            Some(Commands::Status(cmd)) => cmd.execute(&config),
            None => {
                let prompter = TerminalPrompter;
                let action = prompter.choose_action()?;
                Coordinator::new(&config, &prompter, platform::stdin_is_interactive())
                    .run(action, Acquisition::Ask)
                    .await
            }
        }
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig { log_level, no_progress: self.no_progress }
    }
}

/// Resolve the acquisition decision from the shared install/update flags.
///
/// With neither flag given, interactive sessions get the mode prompt and
/// scripted ones default to auto-download.
pub(crate) fn acquisition_from_flags(from: Option<PathBuf>, auto: bool) -> Acquisition {
    match from {
        Some(path) => Acquisition::Manual(path),
        None if auto => Acquisition::Auto,
        None if platform::stdin_is_interactive() => Acquisition::Ask,
        None => Acquisition::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_accepts_a_local_path() {
        let cli = Cli::try_parse_from(["orbitup", "install", "--from", "/tmp/orbit.AppImage"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Install(_))));
    }

    #[test]
    fn from_and_auto_are_mutually_exclusive() {
        assert!(
            Cli::try_parse_from(["orbitup", "install", "--from", "/tmp/x", "--auto"]).is_err()
        );
    }

    #[test]
    fn verbose_and_quiet_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["orbitup", "--verbose", "--quiet", "status"]).is_err());
    }

    #[test]
    fn verbose_maps_to_debug_level() {
        let cli = Cli::try_parse_from(["orbitup", "--verbose", "status"]).unwrap();
        assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn acquisition_prefers_supplied_path() {
        let acq = acquisition_from_flags(Some(PathBuf::from("/tmp/x")), false);
        assert_eq!(acq, Acquisition::Manual(PathBuf::from("/tmp/x")));
        assert_eq!(acquisition_from_flags(None, true), Acquisition::Auto);
    }

    #[test]
    fn bare_invocation_parses_without_subcommand() {
        let cli = Cli::try_parse_from(["orbitup"]).unwrap();
        assert!(cli.command.is_none());
    }
}
