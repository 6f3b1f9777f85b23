//! Configuration management for skycast
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and validates all settings before the pipeline starts.

use crate::SkycastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for skycast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkycastConfig {
    /// Location search configuration
    #[serde(default)]
    pub search: SearchConfig,
    /// Forecast page and extraction configuration
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint URL
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    /// Locale sent with every search call
    #[serde(default = "default_language")]
    pub language: String,
    /// Location type filter sent with every search call
    #[serde(default = "default_location_type")]
    pub location_type: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Forecast fetch and extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Base URL the selected place id is templated into
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,
    /// Number of outlook rows retained beyond today
    #[serde(default = "default_outlook_days")]
    pub outlook_days: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_search_endpoint() -> String {
    "https://weather.com/api/v1/p/redux-dal".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_location_type() -> String {
    "locale".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_forecast_base_url() -> String {
    "https://weather.com".to_string()
}

/// Canonical outlook horizon. The source page shows more rows; everything past
/// this many (after skipping the duplicated "today" row) is dropped.
fn default_outlook_days() -> usize {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            language: default_language(),
            location_type: default_location_type(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_forecast_base_url(),
            outlook_days: default_outlook_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SkycastConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            forecast: ForecastConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SkycastConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specific path (falling back to the platform
    /// config dir), then apply `SKYCAST_` environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("SKYCAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: SkycastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skycast").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if !self.search.endpoint.starts_with("http://")
            && !self.search.endpoint.starts_with("https://")
        {
            return Err(
                SkycastError::config("Search endpoint must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if !self.forecast.base_url.starts_with("http://")
            && !self.forecast.base_url.starts_with("https://")
        {
            return Err(
                SkycastError::config("Forecast base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if self.search.timeout_seconds == 0 || self.search.timeout_seconds > 300 {
            return Err(
                SkycastError::config("Request timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.forecast.outlook_days == 0 || self.forecast.outlook_days > 9 {
            return Err(
                SkycastError::config("Outlook horizon must be between 1 and 9 days").into(),
            );
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkycastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SkycastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SkycastConfig::default();
        assert_eq!(config.search.endpoint, "https://weather.com/api/v1/p/redux-dal");
        assert_eq!(config.search.language, "en-US");
        assert_eq!(config.search.location_type, "locale");
        assert_eq!(config.forecast.base_url, "https://weather.com");
        assert_eq!(config.forecast.outlook_days, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SkycastConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = SkycastConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_bad_endpoint() {
        let mut config = SkycastConfig::default();
        config.search.endpoint = "ftp://weather.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_outlook_range() {
        let mut config = SkycastConfig::default();
        config.forecast.outlook_days = 0;
        assert!(config.validate().is_err());

        config.forecast.outlook_days = 10;
        assert!(config.validate().is_err());

        config.forecast.outlook_days = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = SkycastConfig::default();
        config.search.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = SkycastConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("skycast"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
