//! Fixed identity of the managed application.
//!
//! Everything `orbitup` installs, updates, or removes is derived from the
//! names and endpoints below. Components never hard-code paths themselves;
//! they receive them through [`crate::config::Config`], which is built from
//! these constants plus the user's override file and environment.

/// Display name used in the desktop entry and user-facing messages.
pub const APP_DISPLAY_NAME: &str = "Orbit";

/// File name of the installed artifact inside the install directory.
pub const ARTIFACT_FILE_NAME: &str = "orbit.AppImage";

/// File name of the installed icon inside the install directory.
///
/// The same name is expected for the icon source shipped next to the
/// `orbitup` executable.
pub const ICON_FILE_NAME: &str = "orbit.png";

/// File name of the desktop entry registered in the applications directory.
pub const DESKTOP_ENTRY_FILE_NAME: &str = "orbit.desktop";

/// File name of the staged download in the system temp directory.
///
/// A fixed name, not a fresh temp file: re-running a failed download
/// overwrites the previous attempt instead of accumulating partial files.
pub const STAGING_FILE_NAME: &str = "orbit.AppImage.part";

/// Flag appended to the artifact path in the desktop entry's `Exec` line.
pub const LAUNCH_FLAG: &str = "--no-sandbox";

/// Category tag written into the desktop entry.
pub const DESKTOP_CATEGORIES: &str = "Utility;";

/// Release API endpoint queried in auto-download mode.
pub const RELEASE_API_URL: &str = "https://releases.orbitapp.io/api/latest";

/// Release track requested from the API unless overridden in the config file.
pub const DEFAULT_RELEASE_TRACK: &str = "stable";

/// Platform selector sent to the release API.
pub const RELEASE_PLATFORM: &str = "linux";

/// Identifying `User-Agent` sent with every API and download request.
pub const USER_AGENT: &str = concat!("orbitup/", env!("CARGO_PKG_VERSION"));

/// JSON key the release API is expected to carry the download URL under.
pub const URL_KEY_PRIMARY: &str = "url";

/// Fallback JSON key consulted when [`URL_KEY_PRIMARY`] is absent or null.
pub const URL_KEY_FALLBACK: &str = "download_url";

/// External executables the tool shells out to.
///
/// Missing entries are installed in one batch package-manager call by the
/// dependency resolver before any lifecycle transition that needs them.
pub const REQUIRED_TOOLS: &[&str] = &["update-desktop-database"];

/// Maps a required executable to the package that provides it.
///
/// Unknown executables fall back to their own name, which is correct for
/// most Debian packages.
pub fn tool_package(tool: &str) -> &str {
    match tool {
        "update-desktop-database" => "desktop-file-utils",
        other => other,
    }
}

/// Package manager used to install missing dependencies.
pub const PACKAGE_MANAGER: &str = "apt-get";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_package_maps_known_tools() {
        assert_eq!(tool_package("update-desktop-database"), "desktop-file-utils");
    }

    #[test]
    fn tool_package_falls_back_to_tool_name() {
        assert_eq!(tool_package("curl"), "curl");
    }

    #[test]
    fn user_agent_carries_crate_version() {
        assert!(USER_AGENT.starts_with("orbitup/"));
        assert!(USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
