//! TOML-based configuration with environment variable overrides.
//!
//! Resolution order (highest to lowest):
//!
//! 1. `ENVMON_CONFIG` environment variable (explicit path)
//! 2. `./envmon.toml` (current directory)
//! 3. `$XDG_CONFIG_HOME/envmon/envmon.toml` (or `~/.config/envmon/envmon.toml`)
//! 4. Built-in defaults (no file required)
//!
//! Any value can then be overridden via `ENVMON_<SECTION>_<KEY>` environment
//! variables, e.g. `ENVMON_SERIAL_PORT=/dev/ttyUSB0` or
//! `ENVMON_SERIAL_BAUD=9600`. CLI flags are applied on top by `main`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const ENV_PREFIX: &str = "ENVMON";
const CONFIG_FILE_NAME: &str = "envmon.toml";
const CONFIG_PATH_ENV: &str = "ENVMON_CONFIG";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to parse environment variable '{var}': {message}")]
    EnvParse { var: String, message: String },
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub serial: SerialConfig,
    pub logging: LoggingConfig,
}

/// Serial link configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path of the monitor board.
    pub port: String,
    /// Baud rate.
    pub baud: u32,
    /// Per-read idle timeout in milliseconds.
    pub idle_timeout_ms: u64,
    /// Settle delay after opening the port, giving the board time to come
    /// out of the reset triggered by the host opening the serial line.
    pub settle_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyACM0".to_string(),
            baud: 9600,
            idle_timeout_ms: 1000,
            settle_ms: 2000,
        }
    }
}

impl SerialConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` still wins when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration using the standard resolution order, then apply
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match resolve_config_path() {
            Some(path) => load_from_file(&path)?,
            None => Config::default(),
        };
        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, then apply environment
    /// overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = load_from_file(path.as_ref())?;
        apply_env_overrides(&mut config)?;
        Ok(config)
    }
}

/// Resolve the configuration file path using the standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    if let Some(config_dir) = config_dir() {
        let app_config = config_dir.join("envmon").join(CONFIG_FILE_NAME);
        if app_config.exists() {
            return Some(app_config);
        }
    }

    None
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
}

fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&content)?)
}

fn env_u64(var: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(var) {
        Ok(val) => val
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvParse {
                var: var.to_string(),
                message: format!("'{val}' is not a valid number"),
            }),
        Err(_) => Ok(None),
    }
}

fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_SERIAL_PORT")) {
        config.serial.port = val;
    }
    if let Some(val) = env_u64(&format!("{ENV_PREFIX}_SERIAL_BAUD"))? {
        config.serial.baud = val as u32;
    }
    if let Some(val) = env_u64(&format!("{ENV_PREFIX}_SERIAL_IDLE_TIMEOUT_MS"))? {
        config.serial.idle_timeout_ms = val;
    }
    if let Some(val) = env_u64(&format!("{ENV_PREFIX}_SERIAL_SETTLE_MS"))? {
        config.serial.settle_ms = val;
    }
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_LOGGING_LEVEL")) {
        config.logging.level = val;
    }
    Ok(())
}
