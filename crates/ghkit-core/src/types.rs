//! Domain types shared by several services.
//!
//! Every response field is optional: GitHub omits fields depending on the
//! endpoint, the token's scopes and the account type, and a missing field must
//! stay distinguishable from a zero value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::UserId;
use crate::query::QueryValue;

/// A GitHub user or organization account, as embedded in most payloads.
///
/// Also used as the request body of `PATCH /user`, which is why absent fields
/// are skipped on serialization.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// Numeric id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// GraphQL node id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Profile page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// API URL of this user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
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
    /// Available for hire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hireable: Option<bool>,
    /// Profile biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Twitter handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_username: Option<String>,
    /// Number of public repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<u64>,
    /// Number of public gists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_gists: Option<u64>,
    /// Follower count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    /// Following count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following: Option<u64>,
    /// `User`, `Organization` or `Bot`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Site administrator flag (Enterprise Server).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_admin: Option<bool>,
    /// Private repositories, owned or not (authenticated user only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_private_repos: Option<u64>,
    /// Owned private repositories (authenticated user only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_private_repos: Option<u64>,
    /// Private gist count (authenticated user only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_gists: Option<u64>,
    /// Disk usage in KiB (authenticated user only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<u64>,
    /// Collaborator count (authenticated user only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<u64>,
    /// Two-factor authentication enabled (authenticated user only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_factor_authentication: Option<bool>,
    /// Billing plan (authenticated user only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    /// Role name when listed as an organization member or collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Suspension time (Enterprise Server).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended_at: Option<DateTime<Utc>>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.login, self.id) {
            (Some(login), _) => f.write_str(login),
            (None, Some(id)) => write!(f, "user #{id}"),
            (None, None) => f.write_str("<unknown user>"),
        }
    }
}

/// Billing plan of a user or organization.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    /// Plan name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Included space in KiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<u64>,
    /// Included collaborators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<u64>,
    /// Included private repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_repos: Option<u64>,
    /// Filled seats (organizations).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled_seats: Option<u64>,
    /// Purchased seats (organizations).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u64>,
}

/// Reaction counts attached to issues and comments.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reactions {
    /// Total number of reactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Thumbs up.
    #[serde(default, rename = "+1", skip_serializing_if = "Option::is_none")]
    pub plus_one: Option<u64>,
    /// Thumbs down.
    #[serde(default, rename = "-1", skip_serializing_if = "Option::is_none")]
    pub minus_one: Option<u64>,
    /// Laugh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laugh: Option<u64>,
    /// Confused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confused: Option<u64>,
    /// Heart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart: Option<u64>,
    /// Hooray.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooray: Option<u64>,
    /// Rocket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rocket: Option<u64>,
    /// Eyes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyes: Option<u64>,
    /// API URL listing the reactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Sort direction accepted by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

impl SortDirection {
    /// Wire value of the direction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl QueryValue for SortDirection {
    fn query_value(&self) -> String {
        self.as_str().to_string()
    }

    fn is_zero(&self) -> bool {
        false
    }
}
