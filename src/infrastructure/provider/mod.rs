//! Streaming LLM provider integration.

pub mod adapter;
pub mod error;
pub mod models;
pub mod rate_limiter;
pub mod retry;
pub mod streaming;
pub mod types;

pub use adapter::StreamAdapter;
pub use error::ProviderError;
pub use models::{resolve_model, ModelDescriptor, DEFAULT_MODEL_ID, MODELS};
pub use rate_limiter::{RequestSpacer, MIN_REQUEST_INTERVAL};
pub use retry::RetryPolicy;
pub use streaming::{GenerationStream, StreamEvent};
pub use types::{ChatMessage, ChatRequest, Role};
