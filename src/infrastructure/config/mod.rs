//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Provider base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid temperature: {0}. Must be within 0.0..=1.0")]
    InvalidTemperature(f32),

    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `taskguard.yaml` in the working directory
    /// 3. Environment variables (`TASKGUARD_*` prefix, `__` separator)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("taskguard.yaml"))
            .merge(Env::prefixed("TASKGUARD_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.provider.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if !(0.0..=1.0).contains(&config.provider.temperature) {
            return Err(ConfigError::InvalidTemperature(config.provider.temperature));
        }

        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }

        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_pass_validation() {
        assert!(ConfigLoader::validate(&Config::default()).is_ok());
    }

    #[test]
    fn load_from_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        write!(
            file,
            "provider:\n  api_key: sk-test\n  model: mistral-large-latest\nretry:\n  max_retries: 5\n"
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.provider.api_key, "sk-test");
        assert_eq!(config.provider.model.as_deref(), Some("mistral-large-latest"));
        assert_eq!(config.retry.max_retries, 5);
        // Untouched sections keep their defaults.
        assert_eq!(config.provider.base_url, "https://api.mistral.ai");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn zero_retries_is_rejected() {
        let mut config = Config::default();
        config.retry.max_retries = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxRetries(0))
        ));
    }

    #[test]
    fn inverted_backoff_is_rejected() {
        let mut config = Config::default();
        config.retry.initial_backoff_ms = 60_000;
        config.retry.max_backoff_ms = 1_000;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(60_000, 1_000))
        ));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut config = Config::default();
        config.provider.temperature = 2.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn invalid_file_config_fails_validation() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        write!(file, "logging:\n  format: xml\n").unwrap();

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }
}
