//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::client::ClientConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Invalid(format!("unknown log format '{}'", other))),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Invalid(error) => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> LoadedConfig {
        let mut config = Config::default();
        let warnings = config.apply_env_overrides();
        LoadedConfig {
            config,
            source: None,
            warnings,
        }
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<LoadedConfig, ConfigError> {
        let mut config = Self::load(path)?;
        let warnings = config.apply_env_overrides();
        Ok(LoadedConfig {
            config,
            source: Some(path.to_path_buf()),
            warnings,
        })
    }

    /// Load from default locations or environment
    pub fn load_default() -> LoadedConfig {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("shiptrack").join("config.toml")),
            Some(PathBuf::from("/etc/shiptrack/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths, |key| std::env::var(key).ok())
    }

    /// Load the first readable file among `paths`, recording the ones skipped
    fn load_first(paths: &[PathBuf], lookup: impl Fn(&str) -> Option<String>) -> LoadedConfig {
        let mut warnings = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(mut config) => {
                    warnings.extend(config.apply_overrides(&lookup));
                    return LoadedConfig {
                        config,
                        source: Some(path.clone()),
                        warnings,
                    };
                }
                Err(e) => warnings.push(e),
            }
        }

        let mut config = Config::default();
        warnings.extend(config.apply_overrides(&lookup));
        LoadedConfig {
            config,
            source: None,
            warnings,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Vec<ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`
    ///
    /// Unparsable values leave the setting alone and come back as warnings.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ConfigError> {
        let mut warnings = Vec::new();

        if let Some(url) = lookup("SHIPTRACK_API_URL") {
            self.client.base_url = url;
        }
        if let Some(timeout) = lookup("SHIPTRACK_REQUEST_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => self.client.request_timeout_ms = Some(ms),
                Err(_) => warnings.push(ConfigError::Invalid(format!(
                    "ignoring SHIPTRACK_REQUEST_TIMEOUT_MS={}",
                    timeout
                ))),
            }
        }

        if let Some(level) = lookup("SHIPTRACK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SHIPTRACK_LOG_FORMAT") {
            match format.parse() {
                Ok(f) => self.logging.format = f,
                Err(e) => warnings.push(e),
            }
        }

        warnings
    }
}

/// A loaded configuration plus what happened while loading it
///
/// Loading runs before logging is installed, so nothing is logged here;
/// call [`LoadedConfig::report`] once the subscriber is up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from; `None` for defaults plus environment
    pub source: Option<PathBuf>,
    /// Skipped files and ignored overrides
    pub warnings: Vec<ConfigError>,
}

impl LoadedConfig {
    /// Log the source and every warning
    pub fn report(&self) {
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::debug!("Using default config with environment overrides"),
        }
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Shiptrack Configuration
#
# Environment variables override these settings:
# - SHIPTRACK_API_URL
# - SHIPTRACK_REQUEST_TIMEOUT_MS
# - SHIPTRACK_LOG_LEVEL
# - SHIPTRACK_LOG_FORMAT

[client]
# Base URL of the tracking backend
base_url = "http://localhost:8000/api"

# Request timeout in milliseconds (unset = transport default)
# request_timeout_ms = 5000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.client.base_url, "http://localhost:8000/api");
        assert_eq!(config.client.request_timeout_ms, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.client.base_url, Config::default().client.base_url);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nbase_url = \"http://tracker:9000/api\"\nrequest_timeout_ms = 250").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.client.base_url, "http://tracker:9000/api");
        assert_eq!(config.client.request_timeout_ms, Some(250));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[logging]\nformat = \"xml\"\n").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SHIPTRACK_API_URL", "http://staging:8000/api"),
            ("SHIPTRACK_REQUEST_TIMEOUT_MS", "1500"),
            ("SHIPTRACK_LOG_LEVEL", "debug"),
            ("SHIPTRACK_LOG_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        let warnings = config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert!(warnings.is_empty());

        assert_eq!(config.client.base_url, "http://staging:8000/api");
        assert_eq!(config.client.request_timeout_ms, Some(1500));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_overrides_are_reported() {
        let mut config = Config::default();
        let warnings = config.apply_overrides(|key| match key {
            "SHIPTRACK_REQUEST_TIMEOUT_MS" => Some("soon".to_string()),
            "SHIPTRACK_LOG_FORMAT" => Some("xml".to_string()),
            _ => None,
        });

        assert_eq!(config.client.request_timeout_ms, None);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].to_string().contains("SHIPTRACK_REQUEST_TIMEOUT_MS"));
        assert!(warnings[1].to_string().contains("xml"));
    }

    #[test]
    fn test_broken_file_is_skipped_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "garbage = [").unwrap();
        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[client]\nbase_url = \"http://tracker:9000/api\"\n").unwrap();
        let missing = dir.path().join("missing.toml");

        let loaded = Config::load_first(&[missing, broken.clone(), good.clone()], |_| None);

        assert_eq!(loaded.source, Some(good));
        assert_eq!(loaded.config.client.base_url, "http://tracker:9000/api");
        assert_eq!(loaded.warnings.len(), 1);
        assert!(matches!(&loaded.warnings[0], ConfigError::Parse { path, .. } if *path == broken));
    }

    #[test]
    fn test_no_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "garbage = [").unwrap();

        let loaded = Config::load_first(&[broken], |key| {
            (key == "SHIPTRACK_API_URL").then(|| "http://env:8000/api".to_string())
        });

        assert_eq!(loaded.source, None);
        assert_eq!(loaded.config.client.base_url, "http://env:8000/api");
        assert_eq!(loaded.warnings.len(), 1);
    }
}
