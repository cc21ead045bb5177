//! Integration tests for parsing repository payloads.

use ghkit_core::ids::RepositoryId;
use ghkit_repos::models::{Branch, Repository, Visibility};
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

#[test]
fn test_deserialize_full_repository() {
    let json_data = load_fixture("repository.json");
    let repo: Repository = serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize repository: {e}\nJSON: {json_data}"));

    assert_eq!(repo.id, Some(RepositoryId::new(1_296_269)));
    assert_eq!(repo.full_name.as_deref(), Some("octocat/Hello-World"));
    assert_eq!(repo.visibility, Some(Visibility::Public));
    assert_eq!(repo.fork, Some(true));
    // explicit null stays unset
    assert!(repo.language.is_none());
    assert_eq!(repo.topics.as_ref().map(Vec::len), Some(4));

    let permissions = repo.permissions.as_ref().expect("permissions present");
    assert_eq!(permissions.get("pull"), Some(&true));
    assert_eq!(permissions.get("admin"), Some(&false));

    let license = repo.license.as_ref().expect("license present");
    assert_eq!(license.spdx_id.as_deref(), Some("MIT"));

    let parent = repo.parent.as_ref().expect("forks carry their parent");
    assert_eq!(parent.full_name.as_deref(), Some("upstream/Hello-World"));
    assert_eq!(parent.fork, Some(false));
    assert!(parent.owner.is_none());
}

#[test]
fn test_repository_timestamps() {
    let json_data = load_fixture("repository.json");
    let repo: Repository = serde_json::from_str(&json_data).unwrap();

    let created = repo.created_at.expect("created_at present");
    let pushed = repo.pushed_at.expect("pushed_at present");
    assert!(pushed > created);
}

#[test]
fn test_deserialize_branches() {
    let json_data = load_fixture("branches.json");
    let branches: Vec<Branch> = serde_json::from_str(&json_data).unwrap();

    assert_eq!(branches.len(), 2);
    assert_eq!(branches[0].protected, Some(true));
    assert!(branches[1].protection_url.is_none());
    assert_eq!(
        branches[1].commit.as_ref().and_then(|c| c.sha.as_deref()),
        Some("7fd1a60b01f91b314f59955a4e4d4e80d8edf11d")
    );
}
