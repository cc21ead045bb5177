//! Issues, comments and labels.

use chrono::{DateTime, Utc};
use ghkit_core::ids::{CommentId, IssueId, LabelId, MilestoneId};
use ghkit_core::pagination::ListOptions;
use ghkit_core::query::{QueryParams, QueryValue, ToQuery};
use ghkit_core::types::{Reactions, SortDirection, User};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Issue state, as stored and as used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Open issues
    Open,
    /// Closed issues
    Closed,
    /// Either state (list filter only)
    All,
}

impl IssueState {
    /// Wire value of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl QueryValue for IssueState {
    fn query_value(&self) -> String {
        self.as_str().to_string()
    }

    fn is_zero(&self) -> bool {
        false
    }
}

/// Sort field for issue and comment lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueSort {
    /// Creation time
    Created,
    /// Last update time
    Updated,
    /// Number of comments (issues only)
    Comments,
}

impl QueryValue for IssueSort {
    fn query_value(&self) -> String {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Comments => "comments",
        }
        .to_string()
    }

    fn is_zero(&self) -> bool {
        false
    }
}

/// Parameters supported by `GET issues` and `GET user/issues`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IssueListOptions {
    /// Which issues to return (`assigned`, `created`, `mentioned`, `subscribed`, `repos`, `all`).
    pub filter: Option<String>,
    /// State filter.
    pub state: Option<IssueState>,
    /// Label names, all of which must match.
    pub labels: Vec<String>,
    /// Sort field.
    pub sort: Option<IssueSort>,
    /// Sort direction.
    pub direction: Option<SortDirection>,
    /// Only issues updated at or after this time.
    pub since: Option<DateTime<Utc>>,
    /// Pagination.
    pub list: ListOptions,
}

impl ToQuery for IssueListOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("filter", self.filter.as_deref());
        params.push_opt("state", self.state);
        params.push_joined("labels", &self.labels);
        params.push_opt("sort", self.sort);
        params.push_opt("direction", self.direction);
        params.push_opt("since", self.since.as_ref());
        params.extend_from(&self.list);
    }
}

/// Parameters supported by `GET repos/{owner}/{repo}/issues`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IssueListByRepoOptions {
    /// Milestone number, `*` for any or `none` for no milestone.
    pub milestone: Option<String>,
    /// State filter.
    pub state: Option<IssueState>,
    /// Assignee login, `*` for any or `none` for unassigned.
    pub assignee: Option<String>,
    /// Creator login.
    pub creator: Option<String>,
    /// Login mentioned in the issue.
    pub mentioned: Option<String>,
    /// Label names, all of which must match.
    pub labels: Vec<String>,
    /// Sort field.
    pub sort: Option<IssueSort>,
    /// Sort direction.
    pub direction: Option<SortDirection>,
    /// Only issues updated at or after this time.
    pub since: Option<DateTime<Utc>>,
    /// Pagination.
    pub list: ListOptions,
}

impl ToQuery for IssueListByRepoOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("milestone", self.milestone.as_deref());
        params.push_opt("state", self.state);
        params.push_opt("assignee", self.assignee.as_deref());
        params.push_opt("creator", self.creator.as_deref());
        params.push_opt("mentioned", self.mentioned.as_deref());
        params.push_joined("labels", &self.labels);
        params.push_opt("sort", self.sort);
        params.push_opt("direction", self.direction);
        params.push_opt("since", self.since.as_ref());
        params.extend_from(&self.list);
    }
}

/// Parameters supported by the issue comment list endpoints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IssueListCommentsOptions {
    /// Sort field (repository-wide listing only).
    pub sort: Option<IssueSort>,
    /// Sort direction (repository-wide listing only).
    pub direction: Option<SortDirection>,
    /// Only comments updated at or after this time.
    pub since: Option<DateTime<Utc>>,
    /// Pagination.
    pub list: ListOptions,
}

impl ToQuery for IssueListCommentsOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("sort", self.sort);
        params.push_opt("direction", self.direction);
        params.push_opt("since", self.since.as_ref());
        params.extend_from(&self.list);
    }
}

/// Body of the lock endpoint.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockIssueOptions {
    /// `off-topic`, `too heated`, `resolved` or `spam`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_reason: Option<String>,
}

/// An issue (or pull request, which GitHub also lists as issues).
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    /// Numeric id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IssueId>,
    /// GraphQL node id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Number within the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// State.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    /// Why the issue was closed or reopened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_reason: Option<String>,
    /// Whether the conversation is locked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    /// Reason given when locking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_lock_reason: Option<String>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body in Markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    /// First assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    /// All assignees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<User>>,
    /// Milestone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
    /// Comment count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    /// Author's association with the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_association: Option<String>,
    /// Present when the issue is a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestLinks>,
    /// Reaction counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
    /// Who closed the issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<User>,
    /// Close time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Web URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// API URL of the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

impl Issue {
    /// True when this entry is a pull request.
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Body for creating or editing an issue. Unset fields are left untouched.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueRequest {
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body in Markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Label names; an empty list removes every label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Single assignee login (deprecated by GitHub in favour of `assignees`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Assignee logins; an empty list removes every assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    /// `open` or `closed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    /// `completed`, `not_planned` or `reopened`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_reason: Option<String>,
    /// Milestone number. Use `remove_milestone` to clear it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}

/// Links present on issues that are pull requests.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestLinks {
    /// API URL of the pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Web URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Diff URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_url: Option<String>,
    /// Patch URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_url: Option<String>,
    /// Merge time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

/// A milestone.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    /// Numeric id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MilestoneId>,
    /// Number within the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `open` or `closed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    /// Creator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<User>,
    /// Open issue count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_issues: Option<u64>,
    /// Closed issue count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_issues: Option<u64>,
    /// Due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_on: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Close time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

/// A label. Also the body for creating and editing labels.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    /// Numeric id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LabelId>,
    /// GraphQL node id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Name; renaming is done by editing with a new name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Hex color without the leading `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this is one of the repository's default labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

/// A comment on an issue. Only `body` is sent when creating or editing.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssueComment {
    /// Numeric id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CommentId>,
    /// GraphQL node id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Body in Markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Author's association with the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_association: Option<String>,
    /// Reaction counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Web URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// API URL of the issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
}
