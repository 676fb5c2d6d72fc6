//! Desktop entry rendering.
//!
//! The menu entry is the one piece of installed state that is generated
//! rather than copied, so it gets a small value type instead of an inline
//! format string: [`DesktopEntry`] carries the five fixed fields and
//! renders them in freedesktop key-value syntax.

use crate::config::Config;
use crate::constants;

/// The freedesktop menu entry registered for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Display name shown in the application menu.
    pub name: String,
    /// Exec line: artifact path plus the fixed launch flag.
    pub exec: String,
    /// Absolute path of the installed icon.
    pub icon: String,
    /// Category tag list, semicolon-terminated.
    pub categories: String,
}

impl DesktopEntry {
    /// Build the entry for the configured installation layout.
    pub fn for_config(config: &Config) -> Self {
        Self {
            name: constants::APP_DISPLAY_NAME.to_string(),
            exec: format!("{} {}", config.artifact_path.display(), constants::LAUNCH_FLAG),
            icon: config.icon_path.display().to_string(),
            categories: constants::DESKTOP_CATEGORIES.to_string(),
        }
    }

    /// Render the entry file content.
    pub fn render(&self) -> String {
        format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name={}\n\
             Exec={}\n\
             Icon={}\n\
             Categories={}\n",
            self.name, self.exec, self.icon, self.categories
        )
    }
}
