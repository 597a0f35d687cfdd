//! Wire request types for the provider's chat-completions endpoint.

use serde::{Deserialize, Serialize};

/// Role of a conversation participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// One message in the conversation sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Request body for a streaming chat completion.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Resolved model identifier.
    pub model: String,

    /// System prompt followed by the conversation, in order.
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature.
    pub temperature: f32,

    /// Always true: this adapter only speaks the streaming protocol.
    pub stream: bool,
}
