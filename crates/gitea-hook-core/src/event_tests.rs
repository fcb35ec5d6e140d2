//! Tests for event kind identifiers.

use super::*;
use std::collections::HashSet;

#[test]
fn test_constants_match_wire_names() {
    assert_eq!(EventKind::PUSH.as_str(), "push");
    assert_eq!(EventKind::ISSUES.as_str(), "issues");
    assert_eq!(EventKind::PULL_REQUEST.as_str(), "pull_request");
    assert_eq!(
        EventKind::PULL_REQUEST_REVIEW_APPROVED.as_str(),
        "pull_request_review_approved"
    );
}

#[test]
fn test_owned_and_static_kinds_are_equal() {
    let owned = EventKind::new(String::from("release"));
    assert_eq!(owned, EventKind::RELEASE);

    let mut set = HashSet::new();
    set.insert(EventKind::RELEASE);
    assert!(set.contains(&owned), "hash must agree with equality");
}

#[test]
fn test_comparison_is_case_sensitive() {
    assert_ne!(EventKind::new("Push"), EventKind::PUSH);
    assert!(!EventKind::new("Push").is_recognized());
}

#[test]
fn test_all_kinds_are_distinct_and_recognized() {
    let all = EventKind::ALL;
    let unique: HashSet<_> = all.iter().collect();
    assert_eq!(unique.len(), EventKind::ALL.len());
    assert!(EventKind::ALL.iter().all(EventKind::is_recognized));
}

#[test]
fn test_serde_is_a_plain_string() {
    let json = serde_json::to_string(&EventKind::FORK).unwrap();
    assert_eq!(json, "\"fork\"");

    let kind: EventKind = serde_json::from_str("\"issue_comment\"").unwrap();
    assert_eq!(kind, EventKind::ISSUE_COMMENT);
}

#[test]
fn test_display_and_str_comparison() {
    let kind = EventKind::from("delete");
    assert_eq!(kind.to_string(), "delete");
    assert!(kind == "delete");
}
