//! End-to-end verifier flow over the public surface, shaped the way a
//! host loop drives it: initialize, append rendered messages, verify,
//! register the follow-up, look it back up.

use taskguard::{Priority, TaskMessage, TaskVerifier, VerificationResult};

#[test]
fn happy_path_task_with_file_edits() {
    let mut verifier = TaskVerifier::new();
    verifier.initialize_task("rename the config flag");

    verifier.add_task_message(TaskMessage::ask("task", Some("rename it".to_string())));
    verifier.add_task_message(TaskMessage::say(
        "tool",
        Some(r#"{"tool":"editedExistingFile","path":"src/config.rs"}"#.to_string()),
    ));
    verifier.add_task_message(TaskMessage::say("completion_result", Some("renamed".to_string())));

    let verdict = verifier.verify_task_completion();
    assert!(verdict.is_complete);
    let next = verdict.next_task.clone().unwrap();
    assert_eq!(next.priority, Priority::Medium);

    // The host loop schedules the follow-up and can read it back.
    let id = verifier.create_verification_task(&verdict).unwrap();
    assert_eq!(verifier.get_verification_task(&id), Some(&verdict));
    assert_eq!(verifier.get_verification_task("verify_bogus"), None);
}

#[test]
fn failed_task_spawns_high_priority_fix_up() {
    let mut verifier = TaskVerifier::new();
    verifier.initialize_task("run the migration");

    verifier.add_task_message(TaskMessage::say("completion_result", None));
    verifier.add_task_message(TaskMessage::say("error", Some("migration failed".to_string())));

    let verdict = verifier.verify_task_completion();
    assert!(!verdict.is_complete);
    assert_eq!(verdict.next_task.as_ref().unwrap().priority, Priority::High);

    let id = verifier.create_verification_task(&verdict).unwrap();
    assert!(id.starts_with("verify_"));
}

#[test]
fn verdict_without_follow_up_registers_nothing() {
    let mut verifier = TaskVerifier::new();
    verifier.initialize_task("answer a question");
    verifier.add_task_message(TaskMessage::say("completion_result", None));

    let verdict = verifier.verify_task_completion();
    assert_eq!(verdict, VerificationResult::complete());
    assert_eq!(verifier.create_verification_task(&verdict), None);
    assert_eq!(verifier.pending_follow_ups(), 0);
}

#[test]
fn successive_tasks_reuse_one_engine() {
    let mut verifier = TaskVerifier::new();

    verifier.initialize_task("first task");
    verifier.add_task_message(TaskMessage::say("error", None));
    assert!(!verifier.verify_task_completion().is_complete);

    // A new task supersedes the old transcript entirely.
    verifier.initialize_task("second task");
    verifier.add_task_message(TaskMessage::say("completion_result", None));
    assert!(verifier.verify_task_completion().is_complete);
}
