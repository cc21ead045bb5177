//! Repositories models and list options.

use chrono::{DateTime, Utc};
use ghkit_core::ids::RepositoryId;
use ghkit_core::pagination::ListOptions;
use ghkit_core::query::{QueryParams, QueryValue, ToQuery};
use ghkit_core::types::{SortDirection, User};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Repository visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone
    Public,
    /// Visible to collaborators only
    Private,
    /// Visible to enterprise members
    Internal,
    /// Any visibility (list filter only)
    All,
}

impl Visibility {
    /// Wire value of the visibility.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl QueryValue for Visibility {
    fn query_value(&self) -> String {
        self.as_str().to_string()
    }

    fn is_zero(&self) -> bool {
        false
    }
}

/// Sort field for repository lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositorySort {
    /// Creation time
    Created,
    /// Last update time
    Updated,
    /// Last push time
    Pushed,
    /// `owner/name`
    FullName,
}

impl RepositorySort {
    /// Wire value of the sort field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Pushed => "pushed",
            Self::FullName => "full_name",
        }
    }
}

impl QueryValue for RepositorySort {
    fn query_value(&self) -> String {
        self.as_str().to_string()
    }

    fn is_zero(&self) -> bool {
        false
    }
}

/// Parameters supported by `GET user/repos`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepositoryListByAuthenticatedUserOptions {
    /// Limit results to a visibility.
    pub visibility: Option<Visibility>,
    /// Relationship filter, comma-joined (`owner`, `collaborator`, `organization_member`).
    pub affiliation: Vec<String>,
    /// Type filter (`all`, `owner`, `public`, `private`, `member`); cannot be
    /// combined with `visibility` or `affiliation`.
    pub kind: Option<String>,
    /// Sort field.
    pub sort: Option<RepositorySort>,
    /// Sort direction.
    pub direction: Option<SortDirection>,
    /// Only repositories updated after this time.
    pub since: Option<DateTime<Utc>>,
    /// Only repositories updated before this time.
    pub before: Option<DateTime<Utc>>,
    /// Pagination.
    pub list: ListOptions,
}

impl ToQuery for RepositoryListByAuthenticatedUserOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("visibility", self.visibility);
        params.push_joined("affiliation", &self.affiliation);
        params.push_opt("type", self.kind.as_deref());
        params.push_opt("sort", self.sort);
        params.push_opt("direction", self.direction);
        params.push_opt("since", self.since.as_ref());
        params.push_opt("before", self.before.as_ref());
        params.extend_from(&self.list);
    }
}

/// Parameters supported by `GET users/{user}/repos`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepositoryListByUserOptions {
    /// Type filter (`all`, `owner`, `member`).
    pub kind: Option<String>,
    /// Sort field.
    pub sort: Option<RepositorySort>,
    /// Sort direction.
    pub direction: Option<SortDirection>,
    /// Pagination.
    pub list: ListOptions,
}

impl ToQuery for RepositoryListByUserOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("type", self.kind.as_deref());
        params.push_opt("sort", self.sort);
        params.push_opt("direction", self.direction);
        params.extend_from(&self.list);
    }
}

/// Parameters supported by `GET orgs/{org}/repos`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepositoryListByOrgOptions {
    /// Type filter (`all`, `public`, `private`, `forks`, `sources`, `member`).
    pub kind: Option<String>,
    /// Sort field.
    pub sort: Option<RepositorySort>,
    /// Sort direction.
    pub direction: Option<SortDirection>,
    /// Pagination.
    pub list: ListOptions,
}

impl ToQuery for RepositoryListByOrgOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("type", self.kind.as_deref());
        params.push_opt("sort", self.sort);
        params.push_opt("direction", self.direction);
        params.extend_from(&self.list);
    }
}

/// Parameters supported by the contributors endpoint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListContributorsOptions {
    /// Include anonymous contributors.
    pub anon: bool,
    /// Pagination.
    pub list: ListOptions,
}

impl ToQuery for ListContributorsOptions {
    fn append_query(&self, params: &mut QueryParams) {
        // GitHub only understands `anon=1`, never `anon=false`.
        params.push_opt("anon", self.anon.then_some(1u8));
        params.extend_from(&self.list);
    }
}

/// Parameters supported by the branches endpoint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BranchListOptions {
    /// Only protected (`true`) or unprotected (`false`) branches.
    pub protected: Option<bool>,
    /// Pagination.
    pub list: ListOptions,
}

impl ToQuery for BranchListOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("protected", self.protected);
        params.extend_from(&self.list);
    }
}

/// A repository.
///
/// Doubles as the request body for create and edit, where only the fields
/// that are set get sent.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    /// Numeric id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RepositoryId>,
    /// GraphQL node id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Owning account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    /// Repository name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `owner/name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Default branch name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    /// Primary language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Private repository flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Whether this repository is a fork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork: Option<bool>,
    /// Archived flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// Disabled flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Template repository flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    /// Issues enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
    /// Projects enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,
    /// Wiki enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,
    /// Discussions enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_discussions: Option<bool>,
    /// Squash merging allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_squash_merge: Option<bool>,
    /// Merge commits allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_merge_commit: Option<bool>,
    /// Rebase merging allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_rebase_merge: Option<bool>,
    /// Head branches are deleted after merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_branch_on_merge: Option<bool>,
    /// Create an initial commit (create only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>,
    /// `.gitignore` template applied on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitignore_template: Option<String>,
    /// License template applied on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_template: Option<String>,
    /// Team granted access on create (organizations only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    /// Topics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    /// Detected license.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    /// Permissions of the authenticated user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<HashMap<String, bool>>,
    /// Stargazer count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stargazers_count: Option<u64>,
    /// Watcher count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchers_count: Option<u64>,
    /// Fork count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forks_count: Option<u64>,
    /// Open issue count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_issues_count: Option<u64>,
    /// Size in KiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Web URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// HTTPS clone URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_url: Option<String>,
    /// SSH clone URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_url: Option<String>,
    /// Last push time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Repository this one was forked from (full payloads only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Repository>>,
    /// Root of the fork network (full payloads only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Box<Repository>>,
}

/// A license detected on a repository.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct License {
    /// License key (`mit`, `apache-2.0`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Human readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// SPDX identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spdx_id: Option<String>,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A repository contributor.
///
/// Anonymous contributors have no login or id, only an email and name.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contributor {
    /// Login of a registered contributor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// Numeric id of a registered contributor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// `User` or `Anonymous`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Name of an anonymous contributor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email of an anonymous contributor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Number of commits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributions: Option<u64>,
}

/// A commit reference as embedded in tags and branches.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitRef {
    /// Commit SHA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// API URL of the commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A repository tag.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryTag {
    /// Tag name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tagged commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitRef>,
    /// Zip archive URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipball_url: Option<String>,
    /// Tarball archive URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarball_url: Option<String>,
}

/// A branch.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    /// Branch name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Head commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitRef>,
    /// Whether branch protection is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    /// Protection settings URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection_url: Option<String>,
}

/// Body and response of the topics endpoint.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topics {
    /// Topic names; an empty list clears all topics.
    #[serde(default)]
    pub names: Vec<String>,
}
