//! Runtime configuration for orbitup.
//!
//! Every path and endpoint the tool touches lives in one immutable
//! [`Config`] value, constructed once at startup and passed by reference
//! into each component. Nothing else in the crate derives paths on its own.
//!
//! Configuration is resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults from [`crate::constants`] and the platform
//!    directories (`dirs`).
//! 2. The optional user override file `~/.config/orbitup/config.toml`
//!    (location itself overridable via `ORBITUP_CONFIG`).
//! 3. `ORBITUP_*` environment variables, which exist primarily so the
//!    integration tests can isolate the tool inside a temp directory.
//!
//! # Override file format
//!
//! ```toml
//! install_dir = "/home/me/apps/orbit"
//! release_track = "beta"
//! api_url = "https://releases.orbitapp.io/api/latest"
//! required_tools = ["update-desktop-database"]
//! ```

use crate::constants;
use crate::core::error::OrbitupError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Immutable runtime configuration.
///
/// Holds the fixed filesystem layout of the installation, the release API
/// parameters, and the external-tool requirements. Constructed by
/// [`Config::load`] (or [`Config::for_test_root`] in tests) and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the artifact and icon are installed into.
    pub install_dir: PathBuf,
    /// Final artifact path inside [`Self::install_dir`].
    pub artifact_path: PathBuf,
    /// Final icon path inside [`Self::install_dir`].
    pub icon_path: PathBuf,
    /// Directory holding desktop entries for the application menu.
    pub applications_dir: PathBuf,
    /// Desktop entry path inside [`Self::applications_dir`].
    pub desktop_entry_path: PathBuf,
    /// Fixed temporary path downloads are staged at before hand-off.
    pub staging_path: PathBuf,
    /// Expected location of the icon shipped next to the orbitup executable.
    pub icon_source: PathBuf,
    /// Release API endpoint queried in auto-download mode.
    pub api_url: String,
    /// Release track requested from the API.
    pub release_track: String,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// External executables that must be invocable before install/update.
    pub required_tools: Vec<String>,
}

/// Subset of [`Config`] a user may override from the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    install_dir: Option<PathBuf>,
    applications_dir: Option<PathBuf>,
    api_url: Option<String>,
    release_track: Option<String>,
    required_tools: Option<Vec<String>>,
}

impl Config {
    /// Build the configuration from defaults, the override file, and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Fails if the override file exists but cannot be read or parsed, or
    /// if no home directory can be determined for the default layout.
    pub async fn load() -> Result<Self> {
        let file = Self::load_override_file().await?;

        let data_dir = dirs::data_dir().context("could not determine the user data directory")?;

        let install_dir = env_path("ORBITUP_INSTALL_DIR")
            .or(file.install_dir)
            .unwrap_or_else(|| data_dir.join("orbit"));
        let applications_dir = env_path("ORBITUP_APPLICATIONS_DIR")
            .or(file.applications_dir)
            .unwrap_or_else(|| data_dir.join("applications"));
        let staging_path = env_path("ORBITUP_STAGING_DIR")
            .map(|dir| dir.join(constants::STAGING_FILE_NAME))
            .unwrap_or_else(|| env::temp_dir().join(constants::STAGING_FILE_NAME));
        let icon_source = match env_path("ORBITUP_ICON_SOURCE") {
            Some(path) => path,
            None => default_icon_source()?,
        };
        let api_url = env::var("ORBITUP_API_URL")
            .ok()
            .or(file.api_url)
            .unwrap_or_else(|| constants::RELEASE_API_URL.to_string());
        let release_track = env::var("ORBITUP_RELEASE_TRACK")
            .ok()
            .or(file.release_track)
            .unwrap_or_else(|| constants::DEFAULT_RELEASE_TRACK.to_string());
        let required_tools = match env::var("ORBITUP_REQUIRED_TOOLS") {
            Ok(list) => {
                list.split(',').map(str::trim).filter(|t| !t.is_empty()).map(String::from).collect()
            }
            Err(_) => file.required_tools.unwrap_or_else(|| {
                constants::REQUIRED_TOOLS.iter().map(|t| (*t).to_string()).collect()
            }),
        };

        let config = Self::from_layout(
            install_dir,
            applications_dir,
            staging_path,
            icon_source,
            api_url,
            release_track,
            required_tools,
        );
        debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// Read and parse the optional override file.
    async fn load_override_file() -> Result<ConfigFile> {
        let path = match env::var("ORBITUP_CONFIG") {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => match dirs::config_dir() {
                Some(dir) => dir.join("orbitup").join("config.toml"),
                None => return Ok(ConfigFile::default()),
            },
        };

        if !path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| OrbitupError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        debug!(path = %path.display(), "loaded configuration overrides");
        Ok(file)
    }

    fn from_layout(
        install_dir: PathBuf,
        applications_dir: PathBuf,
        staging_path: PathBuf,
        icon_source: PathBuf,
        api_url: String,
        release_track: String,
        required_tools: Vec<String>,
    ) -> Self {
        Self {
            artifact_path: install_dir.join(constants::ARTIFACT_FILE_NAME),
            icon_path: install_dir.join(constants::ICON_FILE_NAME),
            desktop_entry_path: applications_dir.join(constants::DESKTOP_ENTRY_FILE_NAME),
            install_dir,
            applications_dir,
            staging_path,
            icon_source,
            api_url,
            release_track,
            user_agent: constants::USER_AGENT.to_string(),
            required_tools,
        }
    }

    /// Whether the artifact file exists.
    ///
    /// This is the authoritative signal for install/update decisions; the
    /// broader three-path state is reported by [`crate::core::inspect`].
    pub fn artifact_installed(&self) -> bool {
        self.artifact_path.exists()
    }

    /// Configuration rooted entirely under one directory, for tests.
    ///
    /// No network defaults change, but every path points inside `root` and
    /// the required-tool list is empty so tests never invoke the package
    /// manager.
    pub fn for_test_root(root: &Path) -> Self {
        Self::from_layout(
            root.join("install"),
            root.join("applications"),
            root.join("staging").join(constants::STAGING_FILE_NAME),
            root.join("tools").join(constants::ICON_FILE_NAME),
            constants::RELEASE_API_URL.to_string(),
            constants::DEFAULT_RELEASE_TRACK.to_string(),
            Vec::new(),
        )
    }
}

/// Read an environment variable as a path, ignoring empty values.
fn env_path(var: &str) -> Option<PathBuf> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}

/// Default icon source: the icon shipped next to the running executable.
fn default_icon_source() -> Result<PathBuf> {
    let exe = env::current_exe().context("failed to determine the orbitup executable path")?;
    let dir = exe.parent().context("orbitup executable has no parent directory")?;
    Ok(dir.join(constants::ICON_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        for var in [
            "ORBITUP_CONFIG",
            "ORBITUP_INSTALL_DIR",
            "ORBITUP_APPLICATIONS_DIR",
            "ORBITUP_STAGING_DIR",
            "ORBITUP_ICON_SOURCE",
            "ORBITUP_API_URL",
            "ORBITUP_RELEASE_TRACK",
            "ORBITUP_REQUIRED_TOOLS",
        ] {
            unsafe { env::remove_var(var) };
        }
    }

    #[tokio::test]
    #[serial]
    async fn defaults_derive_fixed_paths_from_install_dir() {
        clear_env();
        unsafe { env::set_var("ORBITUP_CONFIG", "/nonexistent/orbitup-config.toml") };
        let config = Config::load().await.unwrap();
        assert_eq!(config.artifact_path, config.install_dir.join(constants::ARTIFACT_FILE_NAME));
        assert_eq!(config.icon_path, config.install_dir.join(constants::ICON_FILE_NAME));
        assert_eq!(
            config.desktop_entry_path,
            config.applications_dir.join(constants::DESKTOP_ENTRY_FILE_NAME)
        );
        assert_eq!(config.release_track, constants::DEFAULT_RELEASE_TRACK);
        assert_eq!(config.required_tools, vec!["update-desktop-database".to_string()]);
        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn environment_overrides_win() {
        clear_env();
        let root = TempDir::new().unwrap();
        unsafe {
            env::set_var("ORBITUP_CONFIG", "/nonexistent/orbitup-config.toml");
            env::set_var("ORBITUP_INSTALL_DIR", root.path().join("apps"));
            env::set_var("ORBITUP_RELEASE_TRACK", "beta");
            env::set_var("ORBITUP_REQUIRED_TOOLS", "");
        }
        let config = Config::load().await.unwrap();
        assert_eq!(config.install_dir, root.path().join("apps"));
        assert_eq!(config.artifact_path, root.path().join("apps").join("orbit.AppImage"));
        assert_eq!(config.release_track, "beta");
        assert!(config.required_tools.is_empty());
        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn override_file_is_honored() {
        clear_env();
        let root = TempDir::new().unwrap();
        let config_path = root.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!(
                "install_dir = \"{}\"\nrelease_track = \"nightly\"\nrequired_tools = []\n",
                root.path().join("orbit-home").display()
            ),
        )
        .unwrap();
        unsafe { env::set_var("ORBITUP_CONFIG", &config_path) };
        let config = Config::load().await.unwrap();
        assert_eq!(config.install_dir, root.path().join("orbit-home"));
        assert_eq!(config.release_track, "nightly");
        assert!(config.required_tools.is_empty());
        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn invalid_override_file_is_a_config_error() {
        clear_env();
        let root = TempDir::new().unwrap();
        let config_path = root.path().join("config.toml");
        std::fs::write(&config_path, "install_dir = [not toml").unwrap();
        unsafe { env::set_var("ORBITUP_CONFIG", &config_path) };
        let err = Config::load().await.unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
        clear_env();
    }

    #[test]
    fn test_root_layout_is_self_contained() {
        let root = TempDir::new().unwrap();
        let config = Config::for_test_root(root.path());
        assert!(config.artifact_path.starts_with(root.path()));
        assert!(config.desktop_entry_path.starts_with(root.path()));
        assert!(config.staging_path.starts_with(root.path()));
        assert!(config.required_tools.is_empty());
    }
}
