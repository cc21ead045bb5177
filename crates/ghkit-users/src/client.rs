//! Users service implementation.

use crate::models::{User, UserListOptions};
use crate::Result;
use ghkit_core::ids::UserId;
use ghkit_core::pagination::ListOptions;
use ghkit_core::path::segment;
use ghkit_core::query::add_options;
use ghkit_core::request::{get_json, send_bool, send_empty, send_json, ApiRequest, Requester};
use ghkit_core::response::{Response, ResponseMeta};
use reqwest::Method;
use std::sync::Arc;

/// Endpoints under `/user` and `/users/{user}`.
#[derive(Clone)]
pub struct UsersService {
    requester: Arc<dyn Requester>,
}

impl UsersService {
    /// Create the service over a shared requester.
    #[must_use]
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// Fetch a user. An empty `user` fetches the authenticated user.
    pub async fn get(&self, user: &str) -> Result<Response<User>> {
        let path = user_path(user, "")?;
        get_json(self.requester.as_ref(), path).await
    }

    /// Fetch a user by numeric id.
    pub async fn get_by_id(&self, id: UserId) -> Result<Response<User>> {
        get_json(self.requester.as_ref(), format!("user/{id}")).await
    }

    /// Update the authenticated user's profile.
    pub async fn edit(&self, user: &User) -> Result<Response<User>> {
        let request = ApiRequest::new(Method::PATCH, "user").with_json(user)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// List every user in order of sign-up.
    pub async fn list_all(&self, opts: Option<&UserListOptions>) -> Result<Response<Vec<User>>> {
        let path = add_options("users", opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// List followers of a user. An empty `user` lists the authenticated user's.
    pub async fn list_followers(
        &self,
        user: &str,
        opts: Option<&ListOptions>,
    ) -> Result<Response<Vec<User>>> {
        let path = add_options(&user_path(user, "/followers")?, opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// List users followed by a user. An empty `user` lists the authenticated user's.
    pub async fn list_following(
        &self,
        user: &str,
        opts: Option<&ListOptions>,
    ) -> Result<Response<Vec<User>>> {
        let path = add_options(&user_path(user, "/following")?, opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// Check whether `user` follows `target`. An empty `user` checks the
    /// authenticated user.
    pub async fn is_following(&self, user: &str, target: &str) -> Result<Response<bool>> {
        let path = format!(
            "{}/{}",
            user_path(user, "/following")?,
            segment(target)?
        );
        send_bool(self.requester.as_ref(), ApiRequest::get(path)).await
    }

    /// Follow a user as the authenticated user.
    pub async fn follow(&self, user: &str) -> Result<ResponseMeta> {
        let path = format!("user/following/{}", segment(user)?);
        send_empty(self.requester.as_ref(), ApiRequest::new(Method::PUT, path)).await
    }

    /// Unfollow a user as the authenticated user.
    pub async fn unfollow(&self, user: &str) -> Result<ResponseMeta> {
        let path = format!("user/following/{}", segment(user)?);
        send_empty(self.requester.as_ref(), ApiRequest::delete(path)).await
    }
}

/// `user{suffix}` for the authenticated user, `users/{user}{suffix}` otherwise.
fn user_path(user: &str, suffix: &str) -> Result<String> {
    if user.is_empty() {
        Ok(format!("user{suffix}"))
    } else {
        Ok(format!("users/{}{suffix}", segment(user)?))
    }
}
