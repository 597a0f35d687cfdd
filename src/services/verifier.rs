//! Task-completion verification engine.
//!
//! Inspects the ordered transcript of the current task after the agent
//! claims completion and decides whether the task is genuinely done. The
//! decision is a priority cascade:
//!
//! 1. No completion message at all → incomplete, terminal.
//! 2. Errors at or after the last completion message → incomplete, with a
//!    high-priority fix-up task.
//! 3. File edits anywhere in the transcript → complete, but with a
//!    medium-priority consistency-check task.
//! 4. Otherwise → complete, nothing else to do.
//!
//! Each rule short-circuits the next, so errors after completion always
//! outrank file-edit suggestions regardless of chronological order inside
//! the window. Verification is deterministic and side-effect-free (other
//! than logging) for a given transcript.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::models::{MessageKind, Priority, TaskMessage, VerificationResult};

/// Subtype tag the agent emits when it claims the task is finished.
const COMPLETION_SUBTYPE: &str = "completion_result";
/// Subtype tag for error reports.
const ERROR_SUBTYPE: &str = "error";
/// Subtype tag for tool output messages.
const TOOL_SUBTYPE: &str = "tool";

/// Text markers embedded in tool messages that indicate file modifications.
const FILE_EDIT_MARKERS: [&str; 2] = ["editedExistingFile", "newFileCreated"];

/// Verification engine for a single active task.
///
/// Owns the transcript of the current task and a registry of pending
/// follow-up tasks. One engine instance tracks one task at a time; a new
/// `initialize_task` call supersedes the previous task. A freshly
/// constructed verifier behaves exactly like one initialized with an empty
/// description: every operation is total and never panics.
#[derive(Debug, Default)]
pub struct TaskVerifier {
    description: String,
    transcript: Vec<TaskMessage>,
    follow_ups: HashMap<String, VerificationResult>,
    id_counter: u64,
}

impl TaskVerifier {
    /// Create a verifier with no active task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin monitoring a new task, clearing the previous transcript.
    ///
    /// Registered follow-up tasks survive: they belong to the engine
    /// instance, not to any single task.
    pub fn initialize_task(&mut self, description: impl Into<String>) {
        let description = description.into();
        info!(task = %description, "initializing task");
        self.description = description;
        self.transcript.clear();
    }

    /// Append a message to the current task's transcript.
    ///
    /// Arrival order is preserved; message shape is not validated beyond
    /// treating unknown subtypes as inert. No size bound is enforced here.
    pub fn add_task_message(&mut self, message: TaskMessage) {
        debug!(kind = message.kind.as_str(), subtype = %message.subtype, "appending message");
        self.transcript.push(message);
    }

    /// Decide whether the current task is genuinely done.
    pub fn verify_task_completion(&self) -> VerificationResult {
        debug!(messages = self.transcript.len(), "verifying task completion");

        // Rule 1: the agent never claimed completion.
        let Some(last_completion) = self
            .transcript
            .iter()
            .rposition(|m| m.kind == MessageKind::Say && m.subtype == COMPLETION_SUBTYPE)
        else {
            info!("no completion message found");
            return VerificationResult::incomplete("task has no completion message");
        };

        // Rule 2: errors at or after the last completion claim.
        let errors_after = self.transcript[last_completion..]
            .iter()
            .filter(|m| m.subtype == ERROR_SUBTYPE)
            .count();
        debug!(errors_after, "scanned post-completion window");

        if errors_after > 0 {
            info!(errors_after, "errors detected after completion claim");
            return VerificationResult::incomplete(
                "errors detected after the last completion message",
            )
            .with_next_task("fix the identified errors", Priority::High);
        }

        // Rule 3: file modifications anywhere in the transcript warrant a
        // consistency check even though the task itself counts as done.
        let file_edits = self
            .transcript
            .iter()
            .filter(|m| {
                m.kind == MessageKind::Say
                    && m.subtype == TOOL_SUBTYPE
                    && FILE_EDIT_MARKERS.iter().any(|marker| m.text_contains(marker))
            })
            .count();
        debug!(file_edits, "scanned transcript for file edits");

        if file_edits > 0 {
            info!(file_edits, "task complete, scheduling file-edit verification");
            return VerificationResult::complete().with_next_task(
                "verify file modifications and their consistency",
                Priority::Medium,
            );
        }

        info!("task completed cleanly");
        VerificationResult::complete()
    }

    /// Register a follow-up task for a verdict that proposes one.
    ///
    /// Returns `None` when the verdict carries no `next_task` — nothing to
    /// schedule. Otherwise returns a fresh id, unique for the lifetime of
    /// this engine instance: the monotonic counter guarantees uniqueness,
    /// the timestamp keeps ids meaningful in logs.
    pub fn create_verification_task(&mut self, result: &VerificationResult) -> Option<String> {
        if result.next_task.is_none() {
            debug!("verdict proposes no follow-up, skipping registration");
            return None;
        }

        self.id_counter += 1;
        let id = format!("verify_{}_{}", Utc::now().timestamp_millis(), self.id_counter);
        info!(%id, "registered follow-up task");
        self.follow_ups.insert(id.clone(), result.clone());

        Some(id)
    }

    /// Look up a registered follow-up task. Returns `None` for unknown ids.
    pub fn get_verification_task(&self, id: &str) -> Option<&VerificationResult> {
        self.follow_ups.get(id)
    }

    /// Description of the current task.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Read-only view of the current transcript, in append order.
    pub fn transcript(&self) -> &[TaskMessage] {
        &self.transcript
    }

    /// Number of registered follow-up tasks.
    pub fn pending_follow_ups(&self) -> usize {
        self.follow_ups.len()
    }
}
