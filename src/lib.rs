//! Taskguard - task-completion verification for agentic coding assistants.
//!
//! Taskguard sits between an interactive coding-assistant agent and two
//! external collaborators: a streaming LLM provider and the append-only
//! transcript of the current task. It provides two composable cores:
//!
//! - [`TaskVerifier`]: inspects the transcript after the agent claims
//!   completion and produces a verdict — complete, or incomplete with a
//!   reason and a proposed follow-up task.
//! - [`StreamAdapter`]: wraps one "generate a reply" operation against the
//!   provider with client-side request spacing, bounded retry, and
//!   normalization of heterogeneous chunk payloads into a uniform lazy
//!   sequence of [`StreamEvent`]s.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): pure data models
//! - **Service Layer** (`services`): the verification decision engine
//! - **Infrastructure Layer** (`infrastructure`): provider adapter,
//!   configuration, logging
//!
//! # Example
//!
//! ```
//! use taskguard::{TaskMessage, TaskVerifier};
//!
//! let mut verifier = TaskVerifier::new();
//! verifier.initialize_task("add a config flag");
//! verifier.add_task_message(TaskMessage::say("completion_result", None));
//!
//! let verdict = verifier.verify_task_completion();
//! assert!(verdict.is_complete);
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, LoggingConfig, MessageKind, NextTask, Priority, ProviderConfig, RetryConfig,
    TaskMessage, VerificationResult,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::provider::{
    ChatMessage, GenerationStream, ModelDescriptor, ProviderError, Role, StreamAdapter,
    StreamEvent,
};
pub use services::TaskVerifier;
