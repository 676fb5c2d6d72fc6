//! Error handling for orbitup
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`OrbitupError`]) for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! Fatal errors propagate as `anyhow::Error` through the call stack and are
//! converted once, at the binary entry point, by [`user_friendly_error`] into
//! an [`ErrorContext`] that renders a colored message plus a suggestion.
//!
//! Two variants are deliberately non-fatal: [`OrbitupError::AlreadyInstalled`]
//! and [`OrbitupError::NotInstalled`] describe state mismatches. The lifecycle
//! coordinator catches them, reports informationally, and exits with success.
//!
//! # Examples
//!
//! ```rust,no_run
//! use orbitup::core::{OrbitupError, user_friendly_error};
//!
//! fn acquire() -> Result<(), OrbitupError> {
//!     Err(OrbitupError::Resolution {
//!         reason: "response contained neither `url` nor `download_url`".to_string(),
//!     })
//! }
//!
//! if let Err(e) = acquire() {
//!     user_friendly_error(anyhow::Error::from(e)).display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for orbitup operations.
///
/// Each variant represents one failure mode of the lifecycle flows and
/// carries the details needed for a useful message: paths for filesystem
/// failures, URLs for download failures, stderr for package-manager
/// failures.
#[derive(Error, Debug)]
pub enum OrbitupError {
    /// Required external executables were missing and could not be installed.
    ///
    /// Raised by the dependency resolver when the batch package-manager
    /// invocation fails. Fatal; there is no partial-dependency continuation.
    #[error("failed to install required tools: {tools}")]
    MissingDependency {
        /// Comma-separated list of the executables that were missing.
        tools: String,
        /// Error output from the package-manager invocation.
        stderr: String,
    },

    /// The release API response did not yield a usable download URL.
    ///
    /// Raised before any transfer is attempted.
    #[error("release API did not provide a download URL: {reason}")]
    Resolution {
        /// Why resolution failed (missing keys, null value, non-JSON body).
        reason: String,
    },

    /// The artifact transfer failed or produced an empty file.
    #[error("artifact download failed: {reason}")]
    Download {
        /// The URL the transfer was attempted from.
        url: String,
        /// Why the download was rejected.
        reason: String,
    },

    /// The application icon was not found at its expected local path.
    ///
    /// Checked before any filesystem mutation occurs during install.
    #[error("application icon not found at {}", path.display())]
    MissingIcon {
        /// The path that was checked.
        path: PathBuf,
    },

    /// A filesystem step of the install/update/uninstall flow failed.
    ///
    /// Every step reports a distinct `operation` so the failure point is
    /// unambiguous; earlier steps are not rolled back.
    #[error("failed to {operation}: {}", path.display())]
    FileSystem {
        /// The step that failed, e.g. "move artifact into place".
        operation: String,
        /// The path the step was operating on.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The application is already installed.
    ///
    /// State mismatch; non-fatal and informational.
    #[error("{0} is already installed")]
    AlreadyInstalled(String),

    /// The application is not installed.
    ///
    /// State mismatch; non-fatal and informational.
    #[error("{0} is not installed")]
    NotInstalled(String),

    /// The user configuration file could not be read or parsed.
    #[error("invalid configuration: {reason}")]
    Config {
        /// What was wrong with the configuration.
        reason: String,
    },

    /// HTTP-level failure from the release API or the download transfer.
    #[error("network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error without a more specific classification.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wrapper that pairs an error with user-facing guidance.
///
/// Produced by [`user_friendly_error`] at the CLI boundary. The message is
/// what went wrong; the optional suggestion is what the user can do about
/// it; the optional details add context for less common failures.
#[derive(Debug)]
pub struct ErrorContext {
    /// The primary error message.
    pub message: String,
    /// Actionable suggestion for resolving the error.
    pub suggestion: Option<String>,
    /// Additional context about the failure.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context carrying only the error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach an actionable suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach additional detail text.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with color.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.message);
        if let Some(details) = &self.details {
            eprintln!("  {details}");
        }
        if let Some(suggestion) = &self.suggestion {
            eprintln!("{} {}", "hint:".yellow().bold(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(details) = &self.details {
            write!(f, "\n  {details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nhint: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a tailored suggestion.
///
/// Downcasts to [`OrbitupError`] where possible and maps each variant to
/// guidance a user can act on; other errors are passed through with their
/// chain of causes.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    match error.downcast_ref::<OrbitupError>() {
        Some(OrbitupError::MissingDependency { tools, stderr }) => {
            ErrorContext::new(format!("failed to install required tools: {tools}"))
                .with_details(stderr.trim().to_string())
                .with_suggestion(format!(
                    "install them manually, e.g. `sudo apt-get install {}`",
                    tools.split(", ").map(crate::constants::tool_package).collect::<Vec<_>>().join(" ")
                ))
        }
        Some(OrbitupError::Resolution { reason }) => {
            ErrorContext::new(format!("release API did not provide a download URL: {reason}"))
                .with_suggestion("retry later, or install from a local file with `--from <path>`")
        }
        Some(OrbitupError::Download { url, reason }) => {
            ErrorContext::new(format!("artifact download failed: {reason}"))
                .with_details(format!("while downloading {url}"))
                .with_suggestion("check your network connection, or install from a local file with `--from <path>`")
        }
        Some(OrbitupError::MissingIcon { path }) => {
            ErrorContext::new(format!("application icon not found at {}", path.display()))
                .with_suggestion(format!(
                    "place {} next to the orbitup executable and run install again",
                    crate::constants::ICON_FILE_NAME
                ))
        }
        Some(OrbitupError::FileSystem { operation, path, source }) => {
            ErrorContext::new(format!("failed to {operation}: {}", path.display()))
                .with_details(source.to_string())
                .with_suggestion("check permissions on the install directory and re-run")
        }
        Some(OrbitupError::Config { reason }) => {
            ErrorContext::new(format!("invalid configuration: {reason}"))
                .with_suggestion("fix or remove ~/.config/orbitup/config.toml")
        }
        Some(OrbitupError::Http(e)) => {
            ErrorContext::new(format!("network request failed: {e}"))
                .with_suggestion("check your network connection and retry")
        }
        _ => {
            // Generic fall-through: keep the error chain visible.
            let mut message = error.to_string();
            for cause in error.chain().skip(1) {
                message.push_str(&format!("\n  caused by: {cause}"));
            }
            ErrorContext::new(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn filesystem_error_names_operation_and_path() {
        let err = OrbitupError::FileSystem {
            operation: "move artifact into place".to_string(),
            path: PathBuf::from("/opt/orbit/orbit.AppImage"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("move artifact into place"));
        assert!(msg.contains("/opt/orbit/orbit.AppImage"));
    }

    #[test]
    fn missing_icon_suggestion_names_icon_file() {
        let err = OrbitupError::MissingIcon {
            path: Path::new("/usr/local/bin/orbit.png").to_path_buf(),
        };
        let ctx = user_friendly_error(anyhow::Error::from(err));
        assert!(ctx.message.contains("/usr/local/bin/orbit.png"));
        assert!(ctx.suggestion.unwrap().contains(crate::constants::ICON_FILE_NAME));
    }

    #[test]
    fn missing_dependency_suggestion_maps_packages() {
        let err = OrbitupError::MissingDependency {
            tools: "update-desktop-database".to_string(),
            stderr: "E: Unable to locate package".to_string(),
        };
        let ctx = user_friendly_error(anyhow::Error::from(err));
        assert!(ctx.suggestion.unwrap().contains("desktop-file-utils"));
    }

    #[test]
    fn download_error_keeps_url_in_details() {
        let err = OrbitupError::Download {
            url: "https://example.com/app.bin".to_string(),
            reason: "downloaded file is empty".to_string(),
        };
        let ctx = user_friendly_error(anyhow::Error::from(err));
        assert!(ctx.details.unwrap().contains("https://example.com/app.bin"));
    }

    #[test]
    fn generic_errors_keep_their_cause_chain() {
        let inner = anyhow::anyhow!("root cause");
        let outer = inner.context("outer context");
        let ctx = user_friendly_error(outer);
        assert!(ctx.message.contains("outer context"));
        assert!(ctx.message.contains("root cause"));
    }

    #[test]
    fn error_context_display_includes_hint() {
        let ctx = ErrorContext::new("boom").with_suggestion("try again");
        let rendered = format!("{ctx}");
        assert!(rendered.contains("boom"));
        assert!(rendered.contains("hint: try again"));
    }
}
