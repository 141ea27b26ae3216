//! Production configuration system
//!
//! Provides centralized configuration management with:
//! - Environment variable support
//! - Config file loading (optional)
//! - Runtime defaults
//! - Validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Default Analytics Reporting API v4 endpoint for `reports:batchGet`.
pub const DEFAULT_API_ENDPOINT: &str = "https://analyticsreporting.googleapis.com/v4/reports:batchGet";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Paths configuration
    pub paths: PathsConfig,

    /// Reporting service configuration
    pub reporting: ReportingConfig,

    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root directory that configured credential paths are relative to.
    /// Joined by plain concatenation, so it normally ends with a separator.
    pub base_path: String,
    pub settings_file: PathBuf,
    pub log_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    pub api_endpoint: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let gatop_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gatop");

        Self {
            logging: LoggingConfig {
                level: "ERROR".to_string(),
                format: "pretty".to_string(),
                output: "console".to_string(),
            },
            paths: PathsConfig {
                base_path: default_base_path(),
                settings_file: gatop_dir.join("settings.toml"),
                log_directory: gatop_dir.join("logs"),
            },
            reporting: ReportingConfig {
                api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
                timeout_secs: 30,
            },
            source: None,
        }
    }
}

/// Current directory with a trailing separator, mirroring how a site root is
/// usually expressed.
fn default_base_path() -> String {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    with_trailing_separator(&cwd.to_string_lossy())
}

pub fn with_trailing_separator(path: &str) -> String {
    if path.ends_with('/') || path.ends_with(MAIN_SEPARATOR) {
        path.to_string()
    } else {
        format!("{}{}", path, MAIN_SEPARATOR)
    }
}

impl Config {
    /// Load configuration from environment, file, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        let config_paths = [
            PathBuf::from("gatop.toml"),
            PathBuf::from(".gatop.toml"),
            dirs::config_dir()
                .map(|d| d.join("gatop").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.is_file() {
                config = Self::load_from_file(path)?;
                config.source = Some(path.clone());
                break;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        if let Ok(val) = env::var("GATOP_ABSPATH") {
            self.paths.base_path = with_trailing_separator(&val);
        }
        if let Ok(val) = env::var("GATOP_SETTINGS_FILE") {
            self.paths.settings_file = PathBuf::from(val);
        }
        if let Ok(val) = env::var("GATOP_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        if let Ok(val) = env::var("GATOP_API_ENDPOINT") {
            self.reporting.api_endpoint = val;
        }
        if let Ok(val) = env::var("GATOP_TIMEOUT_SECS") {
            self.reporting.timeout_secs = val.parse()
                .context("Invalid GATOP_TIMEOUT_SECS")?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.reporting.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Reporting timeout must be greater than 0"));
        }

        if !self.reporting.api_endpoint.starts_with("http") {
            return Err(anyhow::anyhow!(
                "Reporting API endpoint must be an http(s) URL, got {}",
                self.reporting.api_endpoint
            ));
        }

        Ok(())
    }
}
