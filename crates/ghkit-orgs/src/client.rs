//! Organizations service implementation.

use crate::models::{ListMembersOptions, Organization, OrganizationsListOptions};
use crate::Result;
use ghkit_core::ids::OrganizationId;
use ghkit_core::pagination::ListOptions;
use ghkit_core::path::segment;
use ghkit_core::query::add_options;
use ghkit_core::request::{get_json, send_bool, send_empty, send_json, ApiRequest, Requester};
use ghkit_core::response::{Response, ResponseMeta};
use ghkit_core::types::User;
use reqwest::Method;
use std::sync::Arc;

/// Endpoints under `/orgs/{org}` and the organization listings.
#[derive(Clone)]
pub struct OrganizationsService {
    requester: Arc<dyn Requester>,
}

impl OrganizationsService {
    /// Create the service over a shared requester.
    #[must_use]
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// List organizations a user belongs to publicly. An empty `user` lists
    /// the authenticated user's organizations.
    pub async fn list(
        &self,
        user: &str,
        opts: Option<&ListOptions>,
    ) -> Result<Response<Vec<Organization>>> {
        let base = if user.is_empty() {
            "user/orgs".to_string()
        } else {
            format!("users/{}/orgs", segment(user)?)
        };
        let path = add_options(&base, opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// List every organization in order of creation.
    pub async fn list_all(
        &self,
        opts: Option<&OrganizationsListOptions>,
    ) -> Result<Response<Vec<Organization>>> {
        let path = add_options("organizations", opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// Fetch an organization.
    pub async fn get(&self, org: &str) -> Result<Response<Organization>> {
        get_json(self.requester.as_ref(), org_path(org, "")?).await
    }

    /// Fetch an organization by numeric id.
    pub async fn get_by_id(&self, id: OrganizationId) -> Result<Response<Organization>> {
        get_json(self.requester.as_ref(), format!("organizations/{id}")).await
    }

    /// Update organization settings.
    pub async fn edit(&self, org: &str, update: &Organization) -> Result<Response<Organization>> {
        let request = ApiRequest::new(Method::PATCH, org_path(org, "")?).with_json(update)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// List members, or only public members when `public_only` is set.
    pub async fn list_members(
        &self,
        org: &str,
        opts: Option<&ListMembersOptions>,
    ) -> Result<Response<Vec<User>>> {
        let public_only = opts.is_some_and(|opts| opts.public_only);
        let suffix = if public_only {
            "/public_members"
        } else {
            "/members"
        };
        let path = add_options(&org_path(org, suffix)?, opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// Check membership. Visibility of private members depends on the caller.
    pub async fn is_member(&self, org: &str, user: &str) -> Result<Response<bool>> {
        let path = org_path(org, &format!("/members/{}", segment(user)?))?;
        send_bool(self.requester.as_ref(), ApiRequest::get(path)).await
    }

    /// Check public membership.
    pub async fn is_public_member(&self, org: &str, user: &str) -> Result<Response<bool>> {
        let path = org_path(org, &format!("/public_members/{}", segment(user)?))?;
        send_bool(self.requester.as_ref(), ApiRequest::get(path)).await
    }

    /// Remove a user from the organization.
    pub async fn remove_member(&self, org: &str, user: &str) -> Result<ResponseMeta> {
        let path = org_path(org, &format!("/members/{}", segment(user)?))?;
        send_empty(self.requester.as_ref(), ApiRequest::delete(path)).await
    }
}

fn org_path(org: &str, suffix: &str) -> Result<String> {
    Ok(format!("orgs/{}{suffix}", segment(org)?))
}
