//! Organizations models and list options.

use chrono::{DateTime, Utc};
use ghkit_core::ids::OrganizationId;
use ghkit_core::pagination::ListOptions;
use ghkit_core::query::{QueryParams, QueryValue, ToQuery};
use ghkit_core::types::Plan;
use serde::{Deserialize, Serialize};

/// Parameters supported by `GET organizations`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrganizationsListOptions {
    /// Only list organizations with an id greater than this one.
    pub since: Option<OrganizationId>,
    /// Results per page, at most 100 (omitted when zero).
    pub per_page: u32,
}

impl ToQuery for OrganizationsListOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("since", self.since);
        params.push_nonzero("per_page", self.per_page);
    }
}

/// Member filter for the members endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberFilter {
    /// Members without two-factor authentication
    TwoFactorDisabled,
    /// Every member
    All,
}

impl QueryValue for MemberFilter {
    fn query_value(&self) -> String {
        match self {
            Self::TwoFactorDisabled => "2fa_disabled",
            Self::All => "all",
        }
        .to_string()
    }

    fn is_zero(&self) -> bool {
        false
    }
}

/// Member role filter for the members endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberRole {
    /// Every member
    All,
    /// Organization owners
    Admin,
    /// Non-owner members
    Member,
}

impl QueryValue for MemberRole {
    fn query_value(&self) -> String {
        match self {
            Self::All => "all",
            Self::Admin => "admin",
            Self::Member => "member",
        }
        .to_string()
    }

    fn is_zero(&self) -> bool {
        false
    }
}

/// Parameters supported by the members endpoints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListMembersOptions {
    /// Only list public members (switches to `public_members`, never sent).
    pub public_only: bool,
    /// Member filter (organization owners only).
    pub filter: Option<MemberFilter>,
    /// Role filter.
    pub role: Option<MemberRole>,
    /// Pagination.
    pub list: ListOptions,
}

impl ToQuery for ListMembersOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("filter", self.filter);
        params.push_opt("role", self.role);
        params.extend_from(&self.list);
    }
}

/// An organization. Doubles as the request body of `PATCH orgs/{org}`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    /// Login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// Numeric id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrganizationId>,
    /// GraphQL node id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Web URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Blog or website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    /// Location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Public email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Twitter handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_username: Option<String>,
    /// Billing email (owners only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_email: Option<String>,
    /// Verified domain flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    /// Organization projects enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_organization_projects: Option<bool>,
    /// Repository projects enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_repository_projects: Option<bool>,
    /// Public repository count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<u64>,
    /// Public gist count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_gists: Option<u64>,
    /// Follower count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    /// Following count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following: Option<u64>,
    /// Private repository count (owners only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_private_repos: Option<u64>,
    /// Owned private repository count (owners only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_private_repos: Option<u64>,
    /// Disk usage in KiB (owners only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<u64>,
    /// Collaborator count (owners only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<u64>,
    /// Billing plan (owners only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    /// Base permission for members (`read`, `write`, `admin`, `none`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_repository_permission: Option<String>,
    /// Members may create repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members_can_create_repositories: Option<bool>,
    /// Two-factor authentication required for members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_factor_requirement_enabled: Option<bool>,
    /// Web commit sign-off required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_commit_signoff_required: Option<bool>,
    /// Always `Organization`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
