//! TUI configuration persistence
//!
//! Saves and loads user preferences such as theme, display units and the
//! payment backend.

use std::fs;
use std::path::{Path, PathBuf};

use ampere_core::{Settings, SettingsStore};
use serde::{Deserialize, Serialize};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Log file name, next to the config file
const LOG_FILE_NAME: &str = "ampere.log";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "ampere";

/// TUI configuration that persists across sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Wallet settings shared with the stores
    #[serde(flatten)]
    pub settings: Settings,

    /// Where to write logs; defaults to the config directory
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl TuiConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to ~/.config
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config).join(CONFIG_DIR_NAME);
            return Some(path);
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Log file to use, explicit or default
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| Self::config_dir().map(|d| d.join(LOG_FILE_NAME)))
    }

    /// Load configuration from the default location
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }
}

impl SettingsStore for TuiConfig {
    fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampere_core::{BackendConfig, FiatRate, ThemeName, Units};

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert_eq!(config.settings().theme, ThemeName::Dark);
        assert_eq!(config.settings().units, Units::Sats);
        assert_eq!(config.settings().backend, BackendConfig::default());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_config_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = TuiConfig {
            settings: Settings {
                theme: ThemeName::Light,
                units: Units::Btc,
                fiat: Some(FiatRate {
                    code: "USD".to_string(),
                    btc_price: 60_000.0,
                }),
                backend: BackendConfig::Lnbits {
                    url: "https://lnbits.example.com/".to_string(),
                    admin_key: "secret".to_string(),
                },
            },
            log_file: Some(PathBuf::from("/tmp/ampere.log")),
        };

        config.save_to(&path).unwrap();
        assert_eq!(TuiConfig::load_from(&path), config);
    }

    #[test]
    fn test_flat_json_layout() {
        let json = r#"{"theme":"light","units":"btc","backend":{"type":"simulated","fail":true}}"#;
        let config: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.settings.theme, ThemeName::Light);
        assert_eq!(config.settings.units, Units::Btc);
        assert_eq!(
            config.settings.backend,
            BackendConfig::Simulated {
                delay_ms: 1500,
                fail: true
            }
        );
    }

    #[test]
    fn test_missing_or_broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(TuiConfig::load_from(&missing), TuiConfig::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(TuiConfig::load_from(&broken), TuiConfig::default());
    }
}
