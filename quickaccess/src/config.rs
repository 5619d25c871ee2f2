//! Persisted settings for Quick Access.
//!
//! Settings are stored in `~/.config/quickaccess.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::PROJECT_NAME;

/// Path to the settings file, or `None` if the home directory can't be resolved.
pub static SETTINGS_PATH: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    let home_dir = dirs::home_dir()?;
    Some(home_dir.join(".config").join(format!("{PROJECT_NAME}.toml")))
});

/// Persisted user settings.
///
/// Holds the single folder preference: the path that is opened in the system
/// file browser when the tray icon is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Folder to open on tray icon click.
    #[serde(default = "default_folder_path")]
    pub folder_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            folder_path: default_folder_path(),
        }
    }
}

impl Settings {
    /// Load settings from the default settings file path.
    ///
    /// Returns default settings if the file doesn't exist or can't be parsed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(SETTINGS_PATH.as_deref())
    }

    /// Load settings from a specific path.
    ///
    /// Returns default settings if the file doesn't exist or can't be parsed.
    #[must_use]
    pub fn load_from_path(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        let settings_string = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                warn!("Failed to read settings file {}: {error}", path.display());
                return Self::default();
            }
        };

        match toml::from_str(&settings_string) {
            Ok(settings) => settings,
            Err(error) => {
                warn!("Failed to parse settings file {}: {error}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to the default settings file path.
    pub fn save(&self) -> Result<()> {
        let Some(path) = SETTINGS_PATH.as_deref() else {
            bail!("Failed to resolve home directory for settings file");
        };
        self.save_to_path(path)
    }

    /// Save settings to a specific path, creating parent directories as needed.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {}", parent.display()))?;
        }

        let settings_string = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, settings_string)
            .with_context(|| format!("Failed to write settings file {}", path.display()))?;

        Ok(())
    }
}

/// Default folder preference: the current user's home directory.
fn default_folder_path() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_use_home_directory() {
        let settings = Settings::default();
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        assert_eq!(settings.folder_path, home_dir);
    }

    #[test]
    fn test_load_with_no_path_returns_defaults() {
        let settings = Settings::load_from_path(None);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_nonexistent_file_returns_defaults() {
        let settings = Settings::load_from_path(Some(Path::new("/nonexistent/quickaccess.toml")));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_invalid_file_returns_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quickaccess.toml");
        fs::write(&path, "folder_path = [ not valid toml").expect("Failed to write test file");

        let settings = Settings::load_from_path(Some(&path));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load_settings() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quickaccess.toml");

        let settings = Settings {
            folder_path: PathBuf::from("/tmp/some/folder"),
        };
        settings.save_to_path(&path).expect("Failed to save settings");

        let loaded = Settings::load_from_path(Some(&path));
        assert_eq!(loaded.folder_path, PathBuf::from("/tmp/some/folder"));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config").join("quickaccess.toml");

        let settings = Settings::default();
        settings.save_to_path(&path).expect("Failed to save settings");

        assert!(path.exists());
    }

    #[test]
    fn test_missing_key_falls_back_to_default() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quickaccess.toml");
        fs::write(&path, "").expect("Failed to write test file");

        let settings = Settings::load_from_path(Some(&path));
        assert_eq!(settings.folder_path, default_folder_path());
    }
}
