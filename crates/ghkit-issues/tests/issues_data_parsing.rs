//! Integration tests for parsing issue payloads.

use ghkit_core::ids::{CommentId, IssueId, LabelId, MilestoneId};
use ghkit_issues::models::{Issue, IssueComment, IssueState};
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

fn load_issues() -> Vec<Issue> {
    let json_data = load_fixture("issue_list.json");
    serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize issue list: {e}\nJSON: {json_data}"))
}

#[test]
fn test_deserialize_issue_list() {
    let issues = load_issues();
    assert_eq!(issues.len(), 2, "Expected 2 issues in test data");
    assert_eq!(issues[0].id, Some(IssueId::new(1)));
    assert_eq!(issues[1].number, Some(1348));
}

#[test]
fn test_issue_labels_and_milestone() {
    let issues = load_issues();
    let issue = &issues[0];

    let labels = issue.labels.as_ref().expect("labels present");
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].id, Some(LabelId::new(208_045_946)));
    assert_eq!(labels[0].color.as_deref(), Some("f29513"));
    assert_eq!(labels[0].default, Some(true));

    let milestone = issue.milestone.as_ref().expect("milestone present");
    assert_eq!(milestone.id, Some(MilestoneId::new(1_002_604)));
    assert_eq!(milestone.state, Some(IssueState::Open));
    assert_eq!(milestone.closed_issues, Some(8));
    assert!(milestone.closed_at.is_none());
    assert!(milestone.due_on.is_some());
}

#[test]
fn test_issue_lock_and_state() {
    let issues = load_issues();

    assert_eq!(issues[0].locked, Some(true));
    assert_eq!(issues[0].active_lock_reason.as_deref(), Some("too heated"));
    assert!(issues[0].state_reason.is_none());
    assert!(!issues[0].is_pull_request());

    assert_eq!(issues[1].state, Some(IssueState::Closed));
    assert!(issues[1].is_pull_request());
    assert!(issues[1]
        .pull_request
        .as_ref()
        .and_then(|pr| pr.merged_at)
        .is_some());
    assert_eq!(issues[1].labels.as_ref().map(Vec::len), Some(0));
}

#[test]
fn test_deserialize_issue_comment() {
    let json_data = load_fixture("issue_comment.json");
    let comment: IssueComment = serde_json::from_str(&json_data).unwrap();

    assert_eq!(comment.id, Some(CommentId::new(1)));
    assert_eq!(comment.body.as_deref(), Some("Me too"));
    let reactions = comment.reactions.expect("reactions present");
    assert_eq!(reactions.total_count, Some(5));
    assert_eq!(reactions.plus_one, Some(3));
    assert_eq!(reactions.minus_one, Some(0));
}
