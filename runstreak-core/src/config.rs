//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/runstreak/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/runstreak/` (~/.config/runstreak/)
//! - Data: `$XDG_DATA_HOME/runstreak/` (~/.local/share/runstreak/)
//! - State/Logs: `$XDG_STATE_HOME/runstreak/` (~/.local/state/runstreak/)
//!
//! There is no ambient global state: the loaded `Config` is constructed at
//! process entry and passed into every component that needs it.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

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
    /// Export/staging configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Report defaults
    #[serde(default)]
    pub reports: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Export and staging configuration.
///
/// Describes where the exporter collaborator drops the compressed archive
/// and where the stager extracts it.
#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    /// Path where the exported archive lands (e.g. ~/Downloads/mylog.tab.zip)
    pub archive_path: Option<PathBuf>,

    /// Directory the stager extracts into
    pub extract_dir: Option<PathBuf>,

    /// Seconds to allow the exporter before checking for the archive
    #[serde(default = "default_export_wait_secs")]
    pub wait_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            archive_path: None,
            extract_dir: None,
            wait_secs: default_export_wait_secs(),
        }
    }
}

fn default_export_wait_secs() -> u64 {
    10
}

/// Report defaults
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Minimum streak length (in days, strict) for the streak summary
    #[serde(default = "default_min_streak_days")]
    pub min_streak_days: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_streak_days: default_min_streak_days(),
        }
    }
}

fn default_min_streak_days() -> i64 {
    10
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
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
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/runstreak/config.toml` (~/.config/runstreak/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("runstreak").join("config.toml")
    }

    /// Returns the data directory path (for the SQLite database)
    ///
    /// `$XDG_DATA_HOME/runstreak/` (~/.local/share/runstreak/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("runstreak")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/runstreak/` (~/.local/state/runstreak/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("runstreak")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/runstreak/runlog.db` (~/.local/share/runstreak/runlog.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("runlog.db")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for CLI binaries that want explicit, stable path
    /// behavior before invoking other components that read these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_DATA_HOME").is_err() {
            std::env::set_var("XDG_DATA_HOME", home.join(".local/share"));
        }

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}
