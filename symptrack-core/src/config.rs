//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/symptrack/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/symptrack/` (~/.config/symptrack/)
//! - Data: `$XDG_DATA_HOME/symptrack/` (~/.local/share/symptrack/)
//! - State/Logs: `$XDG_STATE_HOME/symptrack/` (~/.local/state/symptrack/)

use crate::error::{Error, Result};
use crate::window::AnalyticsWindow;
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics configuration
#[derive(Debug, Deserialize, Default)]
pub struct AnalyticsConfig {
    /// Window used when the caller does not ask for one (days, or "all")
    #[serde(default)]
    pub default_window: AnalyticsWindow,

    /// Fixed UTC offset for hour/day bucketing; machine local time when unset
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl AnalyticsConfig {
    /// Configured offset, if any.
    pub fn utc_offset(&self) -> Result<Option<FixedOffset>> {
        match self.utc_offset_minutes {
            None => Ok(None),
            Some(minutes) => FixedOffset::east_opt(minutes.saturating_mul(60))
                .map(Some)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "analytics.utc_offset_minutes out of range: {}",
                        minutes
                    ))
                }),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        self.analytics.utc_offset()?;
        if self.logging.max_files == 0 {
            return Err(Error::Config("logging.max_files must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/symptrack/config.toml` (~/.config/symptrack/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("symptrack").join("config.toml")
    }

    /// Returns the data directory path (where episode exports usually live)
    ///
    /// `$XDG_DATA_HOME/symptrack/` (~/.local/share/symptrack/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("symptrack")
    }

    /// Returns the default episode journal path
    ///
    /// `$XDG_DATA_HOME/symptrack/entries.json`
    pub fn journal_path() -> PathBuf {
        Self::data_dir().join("entries.json")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/symptrack/` (~/.local/state/symptrack/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("symptrack")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/symptrack/symptrack.log` (~/.local/state/symptrack/symptrack.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("symptrack.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analytics.default_window, AnalyticsWindow::Days(30));
        assert!(config.analytics.utc_offset_minutes.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analytics]
default_window = 7
utc_offset_minutes = -300

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.analytics.default_window, AnalyticsWindow::WEEK);
        assert_eq!(
            config.analytics.utc_offset().unwrap(),
            FixedOffset::west_opt(5 * 3600)
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_all_time_window() {
        let config: Config = toml::from_str("[analytics]\ndefault_window = \"all\"\n").unwrap();
        assert_eq!(config.analytics.default_window, AnalyticsWindow::AllTime);
    }

    #[test]
    fn test_invalid_window_rejected() {
        assert!(toml::from_str::<Config>("[analytics]\ndefault_window = 0\n").is_err());
        assert!(toml::from_str::<Config>("[analytics]\ndefault_window = \"soon\"\n").is_err());
    }

    #[test]
    fn test_validate_offset_range() {
        let config: Config =
            toml::from_str("[analytics]\nutc_offset_minutes = 100000\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analytics]\ndefault_window = 14\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.analytics.default_window, AnalyticsWindow::Days(14));
    }

    #[test]
    fn test_load_from_bad_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nmax_files = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_paths() {
        assert!(Config::config_path().ends_with("symptrack/config.toml"));
        assert!(Config::log_path().ends_with("symptrack/symptrack.log"));
        assert!(Config::journal_path().ends_with("symptrack/entries.json"));
    }
}
