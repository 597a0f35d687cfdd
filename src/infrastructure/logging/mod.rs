//! Logging initialization using tracing.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::domain::models::LoggingConfig;

/// Initialize the global tracing subscriber from configuration.
///
/// The configured level is the default directive; `RUST_LOG` still takes
/// precedence for per-target overrides. Calling this twice returns an
/// error from the underlying subscriber registration.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let default_level = parse_log_level(&config.level)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    match config.format.as_str() {
        "json" => builder
            .json()
            .with_current_span(true)
            .with_target(true)
            .try_init()
            .map_err(|e| anyhow!("failed to initialize logger: {e}"))?,
        "pretty" => builder
            .with_target(true)
            .try_init()
            .map_err(|e| anyhow!("failed to initialize logger: {e}"))?,
        other => return Err(anyhow!("unsupported log format: {other}")),
    }

    Ok(())
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(anyhow!("unsupported log level: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_levels() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "xml".to_string(),
        };
        assert!(init(&config).is_err());
    }
}
