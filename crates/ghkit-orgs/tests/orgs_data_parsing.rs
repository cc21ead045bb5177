//! Integration tests for parsing organization payloads.

use ghkit_core::ids::OrganizationId;
use ghkit_orgs::models::Organization;
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_organization() -> Organization {
    let fixture_path = fixtures_dir().join("organization.json");
    let json_data = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize organization: {e}\nJSON: {json_data}"))
}

#[test]
fn test_deserialize_organization() {
    let org = load_organization();

    assert_eq!(org.login.as_deref(), Some("github"));
    assert_eq!(org.id, Some(OrganizationId::new(1)));
    assert_eq!(org.kind.as_deref(), Some("Organization"));
    assert_eq!(org.is_verified, Some(true));
    assert_eq!(org.default_repository_permission.as_deref(), Some("read"));
    assert_eq!(org.web_commit_signoff_required, Some(false));
}

#[test]
fn test_organization_plan_seats() {
    let org = load_organization();
    let plan = org.plan.expect("owners see the plan");

    assert_eq!(plan.seats, Some(5));
    assert_eq!(plan.filled_seats, Some(4));
}

#[test]
fn test_organization_timestamps() {
    let org = load_organization();
    let created = org.created_at.expect("created_at present");
    let updated = org.updated_at.expect("updated_at present");
    assert!(updated > created);
}
