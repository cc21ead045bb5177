//! Users models.

use ghkit_core::ids::UserId;
use ghkit_core::query::{QueryParams, ToQuery};

pub use ghkit_core::types::{Plan, User};

/// Parameters supported by the `users` list endpoint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UserListOptions {
    /// Only list users with an id greater than this one (omitted when unset).
    pub since: Option<UserId>,
    /// Results per page, at most 100 (omitted when zero).
    pub per_page: u32,
}

impl ToQuery for UserListOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("since", self.since);
        params.push_nonzero("per_page", self.per_page);
    }
}
