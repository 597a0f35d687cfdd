//! Verification verdict domain model.
//!
//! A `VerificationResult` is an immutable value produced by one pass of the
//! verifier over a transcript. "Complete" and "carries a follow-up" are not
//! mutually exclusive: a task can be done while still warranting a
//! consistency check on the files it touched.

use serde::{Deserialize, Serialize};

/// Priority of a proposed follow-up task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A proposed next task, generated when verification finds residual work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextTask {
    /// Free-text description of what remains to be done.
    pub description: String,

    /// How urgently the follow-up should be scheduled.
    pub priority: Priority,
}

impl NextTask {
    pub fn new(description: impl Into<String>, priority: Priority) -> Self {
        Self {
            description: description.into(),
            priority,
        }
    }
}

/// Outcome of verifying a task transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the task is genuinely done.
    pub is_complete: bool,

    /// Human-readable reasons when the task is incomplete or a follow-up
    /// is warranted. Empty when there is nothing to report.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,

    /// Proposed follow-up task, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_task: Option<NextTask>,
}

impl VerificationResult {
    /// A clean verdict: complete, no issues, no follow-up.
    pub const fn complete() -> Self {
        Self {
            is_complete: true,
            issues: Vec::new(),
            next_task: None,
        }
    }

    /// An incomplete verdict carrying a single issue.
    pub fn incomplete(issue: impl Into<String>) -> Self {
        Self {
            is_complete: false,
            issues: vec![issue.into()],
            next_task: None,
        }
    }

    /// Attach a proposed follow-up to the verdict.
    #[must_use]
    pub fn with_next_task(mut self, description: impl Into<String>, priority: Priority) -> Self {
        self.next_task = Some(NextTask::new(description, priority));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_verdict_is_empty() {
        let result = VerificationResult::complete();
        assert!(result.is_complete);
        assert!(result.issues.is_empty());
        assert!(result.next_task.is_none());
    }

    #[test]
    fn incomplete_verdict_carries_issue() {
        let result = VerificationResult::incomplete("something is off");
        assert!(!result.is_complete);
        assert_eq!(result.issues, vec!["something is off".to_string()]);
    }

    #[test]
    fn builder_attaches_follow_up() {
        let result = VerificationResult::complete().with_next_task("re-check", Priority::Medium);
        assert!(result.is_complete);
        let next = result.next_task.unwrap();
        assert_eq!(next.description, "re-check");
        assert_eq!(next.priority, Priority::Medium);
    }

    #[test]
    fn serialization_omits_empty_fields() {
        let json = serde_json::to_string(&VerificationResult::complete()).unwrap();
        assert_eq!(json, r#"{"is_complete":true}"#);
    }

    #[test]
    fn priority_serializes_snake_case() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, r#""high""#);
    }
}
