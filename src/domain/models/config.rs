//! Configuration tree.
//!
//! Every field has a serde default so partial YAML files and sparse
//! environment overrides merge cleanly.

use serde::{Deserialize, Serialize};

/// Main configuration structure for taskguard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// LLM provider connection settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Retry policy configuration.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// LLM provider connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderConfig {
    /// API key for the provider. Empty by default; usually supplied via
    /// the `TASKGUARD_PROVIDER__API_KEY` environment variable.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the provider API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Requested model identifier. Resolved against the static catalog;
    /// unknown ids fall back to the catalog default.
    #[serde(default)]
    pub model: Option<String>,

    /// Sampling temperature for generation requests.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.mistral.ai".to_string()
}

const fn default_temperature() -> f32 {
    0.0
}

const fn default_timeout_secs() -> u64 {
    300
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: None,
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum retry attempts after the initial request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff duration in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff duration in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    10_000
}

const fn default_max_backoff_ms() -> u64 {
    300_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.provider.base_url, "https://api.mistral.ai");
        assert_eq!(config.provider.temperature, 0.0);
        assert_eq!(config.retry.max_retries, 3);
        assert!(config.retry.initial_backoff_ms < config.retry.max_backoff_ms);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"provider":{"api_key":"sk-test"}}"#).unwrap();
        assert_eq!(config.provider.api_key, "sk-test");
        assert_eq!(config.provider.timeout_secs, 300);
        assert_eq!(config.retry.max_retries, 3);
    }
}
