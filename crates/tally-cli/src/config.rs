//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the editor's user history folder.
    pub history_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("history_dir", &self.history_dir)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_dir: default_history_dir(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TALLY_*)
        figment = figment.merge(Env::prefixed("TALLY_"));

        figment.extract()
    }
}

/// Platform default for the VS Code user history folder.
///
/// macOS: `~/Library/Application Support/Code/User/History`,
/// Linux: `~/.config/Code/User/History`.
#[must_use]
pub fn default_history_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Code")
        .join("User")
        .join("History")
}

/// Returns the platform-specific config directory for tally.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tally"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_history_dir_ends_with_editor_path() {
        let path = default_history_dir();
        assert!(path.ends_with("Code/User/History"));
    }

    #[test]
    fn test_default_config_points_at_history_dir() {
        let config = Config::default();
        assert_eq!(config.history_dir, default_history_dir());
    }

    #[test]
    fn test_config_file_overrides_default() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_file = temp.path().join("config.toml");
        std::fs::write(&config_file, "history_dir = \"/tmp/somewhere/History\"\n").unwrap();

        let config = Config::load_from(Some(&config_file)).unwrap();
        assert_eq!(config.history_dir, PathBuf::from("/tmp/somewhere/History"));
    }
}
