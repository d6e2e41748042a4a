//! mq_config - Configuration parsing and validation for Marquee
//!
//! This crate provides:
//! - TOML config file loading and discovery
//! - Environment variable overrides (MARQUEE_*)
//! - Defaults suitable for a local backend

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Top-level Marquee configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MqConfig {
    pub api: ApiConfig,
    pub tui: TuiConfig,
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the booking backend, e.g. `http://localhost:5222/api`
    pub base_url: String,

    /// Optional request timeout in seconds. None means the transport's
    /// own defaults apply and a request may hang indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5222/api".to_string(),
            timeout_secs: None,
        }
    }
}

/// Terminal UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Event poll interval in milliseconds
    pub tick_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_ms: 250 }
    }
}

impl MqConfig {
    /// Load configuration from a specific TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: MqConfig = toml::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Load from a file and apply environment overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Discover a config file in the standard locations.
    ///
    /// Checks `$MARQUEE_CONFIG`, then `./marquee.toml`, then
    /// `<config dir>/marquee/config.toml`. Missing files fall back to
    /// defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("MARQUEE_CONFIG") {
            return Self::load(Path::new(&path));
        }

        let local = Path::new("marquee.toml");
        if local.exists() {
            return Self::load(local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let candidate = config_dir.join("marquee").join("config.toml");
            if candidate.exists() {
                return Self::load(&candidate);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Discover and apply environment overrides
    pub fn discover_with_env() -> Result<Self, ConfigError> {
        let mut config = Self::discover()?;
        config.apply_env()?;
        Ok(config)
    }

    /// Apply MARQUEE_* environment variable overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = std::env::var("MARQUEE_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(value) = std::env::var("MARQUEE_TIMEOUT_SECS") {
            let secs = value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "MARQUEE_TIMEOUT_SECS".to_string(),
                    value,
                })?;
            self.api.timeout_secs = Some(secs);
        }
        if let Ok(value) = std::env::var("MARQUEE_TICK_MS") {
            let ms = value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "MARQUEE_TICK_MS".to_string(),
                    value,
                })?;
            self.tui.tick_ms = ms;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MqConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5222/api");
        assert!(config.api.timeout_secs.is_none());
        assert_eq!(config.tui.tick_ms, 250);
    }

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[api]
base_url = "http://cinema.internal/api"
timeout_secs = 30

[tui]
tick_ms = 100
"#
        )
        .unwrap();

        let config = MqConfig::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://cinema.internal/api");
        assert_eq!(config.api.timeout_secs, Some(30));
        assert_eq!(config.tui.tick_ms, 100);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[api]
base_url = "http://cinema.internal/api"
"#
        )
        .unwrap();

        let config = MqConfig::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://cinema.internal/api");
        assert!(config.api.timeout_secs.is_none());
        assert_eq!(config.tui.tick_ms, 250);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = MqConfig::load(Path::new("/nonexistent/marquee.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not [valid toml").unwrap();

        let result = MqConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = MqConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: MqConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
    }
}
