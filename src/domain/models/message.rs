//! Transcript message domain model.
//!
//! A task transcript is an append-only sequence of these messages, owned by
//! the host loop. The verifier only ever reads a snapshot of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Originator of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Assistant-originated output (status, results, tool reports).
    Say,
    /// User- or tool-originated input (questions, approvals, tool payloads).
    Ask,
}

impl MessageKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Say => "say",
            Self::Ask => "ask",
        }
    }
}

/// One entry in a task transcript.
///
/// The `subtype` is a free-form tag (`completion_result`, `error`, `tool`,
/// ...); unknown tags are inert as far as verification is concerned. The
/// only ordering guarantee is transcript-append order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMessage {
    /// Whether the message came from the assistant or from the user/tools.
    pub kind: MessageKind,

    /// Free-form tag classifying the message.
    pub subtype: String,

    /// Optional text payload. May embed structured markers such as
    /// `editedExistingFile` or `newFileCreated` for tool messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Wall-clock time the message was appended.
    pub timestamp: DateTime<Utc>,
}

impl TaskMessage {
    /// Create an assistant-originated message.
    pub fn say(subtype: impl Into<String>, text: impl Into<Option<String>>) -> Self {
        Self {
            kind: MessageKind::Say,
            subtype: subtype.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a user/tool-originated message.
    pub fn ask(subtype: impl Into<String>, text: impl Into<Option<String>>) -> Self {
        Self {
            kind: MessageKind::Ask,
            subtype: subtype.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Whether the message carries the given text marker.
    pub fn text_contains(&self, marker: &str) -> bool {
        self.text.as_deref().is_some_and(|t| t.contains(marker))
    }
}
