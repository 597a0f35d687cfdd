pub mod config;
pub mod message;
pub mod verification;

pub use config::{Config, LoggingConfig, ProviderConfig, RetryConfig};
pub use message::{MessageKind, TaskMessage};
pub use verification::{NextTask, Priority, VerificationResult};
