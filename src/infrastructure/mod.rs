//! Infrastructure layer.
//!
//! External integrations and adapters:
//! - Streaming LLM provider client (rate limiting, retry, normalization)
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod provider;
