//! # ghkit
//!
//! Asynchronous client for the GitHub REST API.
//!
//! [`GitHub`] builds one shared [`ServiceClient`] and hands out the service
//! objects, all of which send their requests through it:
//!
//! ```no_run
//! use ghkit::{GitHub, GitHubConfig};
//! use ghkit::core::pagination::ListOptions;
//!
//! # async fn run() -> ghkit::Result<()> {
//! let github = GitHub::new(&GitHubConfig::default().with_token("ghp_..."))?;
//! let repos = github
//!     .repositories()
//!     .list_by_org("rust-lang", None)
//!     .await?;
//! for repo in &repos.value {
//!     println!("{}", repo.full_name.as_deref().unwrap_or_default());
//! }
//! let next = ListOptions::default().next(repos.pages());
//! # let _ = next;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;
use tracing::debug;

pub use ghkit_core as core;
pub use ghkit_issues as issues;
pub use ghkit_orgs as orgs;
pub use ghkit_repos as repos;
pub use ghkit_users as users;

pub use ghkit_core::client::ServiceClient;
pub use ghkit_core::config::GitHubConfig;
pub use ghkit_core::rate::{RateCategory, RateLimit, RateLimits};
pub use ghkit_core::request::Requester;
pub use ghkit_core::response::Response;
pub use ghkit_core::{Error, Result};
pub use ghkit_issues::IssuesService;
pub use ghkit_orgs::OrganizationsService;
pub use ghkit_repos::RepositoriesService;
pub use ghkit_users::UsersService;

use ghkit_core::rate::RATE_LIMIT_PATH;
use ghkit_core::request::get_json;

/// Entry point bundling every service over one shared client.
#[derive(Clone)]
pub struct GitHub {
    requester: Arc<dyn Requester>,
    client: Option<ServiceClient>,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl GitHub {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        debug!(base_url = %config.base_url, "building GitHub client");
        Ok(Self::from_client(ServiceClient::from_config(config)?))
    }

    /// Build a client from `GITHUB_TOKEN`/`GH_TOKEN` and `GITHUB_API_URL`.
    ///
    /// # Errors
    ///
    /// See [`GitHub::new`].
    pub fn from_env() -> Result<Self> {
        Self::new(&GitHubConfig::from_env()?)
    }

    /// Wrap an already configured client.
    #[must_use]
    pub fn from_client(client: ServiceClient) -> Self {
        Self {
            requester: Arc::new(client.clone()),
            client: Some(client),
        }
    }

    /// Route every request through a custom requester.
    #[must_use]
    pub fn with_requester(requester: Arc<dyn Requester>) -> Self {
        Self {
            requester,
            client: None,
        }
    }

    /// The shared requester.
    #[must_use]
    pub fn requester(&self) -> Arc<dyn Requester> {
        Arc::clone(&self.requester)
    }

    /// Users API.
    #[must_use]
    pub fn users(&self) -> UsersService {
        UsersService::new(self.requester())
    }

    /// Repositories API.
    #[must_use]
    pub fn repositories(&self) -> RepositoriesService {
        RepositoriesService::new(self.requester())
    }

    /// Issues API.
    #[must_use]
    pub fn issues(&self) -> IssuesService {
        IssuesService::new(self.requester())
    }

    /// Organizations API.
    #[must_use]
    pub fn organizations(&self) -> OrganizationsService {
        OrganizationsService::new(self.requester())
    }

    /// Fetch the current quota of every bucket. Does not count against the quota.
    ///
    /// # Errors
    ///
    /// Propagates request and decoding errors.
    pub async fn rate_limits(&self) -> Result<Response<RateLimits>> {
        get_json(self.requester.as_ref(), RATE_LIMIT_PATH).await
    }

    /// Last rate limit observed by the shared client for a bucket.
    ///
    /// Always `None` for custom requesters.
    #[must_use]
    pub fn last_rate_limit(&self, category: RateCategory) -> Option<RateLimit> {
        self.client
            .as_ref()
            .and_then(|client| client.rate_limit(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ghkit_core::client::RetryPolicy;
    use ghkit_core::request::{ApiRequest, RawResponse};
    use ghkit_core::response::ResponseMeta;
    use reqwest::header::HeaderMap;
    use reqwest::Method;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    mockall::mock! {
        pub Transport {}

        #[async_trait]
        impl Requester for Transport {
            async fn execute(&self, request: ApiRequest) -> Result<RawResponse>;
        }
    }

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            meta: ResponseMeta::new(status, HeaderMap::new()),
            body: body.to_string(),
        }
    }

    fn test_github(server: &MockServer) -> GitHub {
        let client = ServiceClient::builder(server.uri())
            .unwrap()
            .with_token("facade-token")
            .with_retry_policy(RetryPolicy::no_retry())
            .build()
            .unwrap();
        GitHub::from_client(client)
    }

    #[tokio::test]
    async fn services_share_one_client() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .and(header("authorization", "Bearer facade-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-ratelimit-limit", "5000")
                    .insert_header("x-ratelimit-remaining", "4999")
                    .insert_header("x-ratelimit-reset", "1700000000")
                    .set_body_json(json!({"login": "octocat"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/orgs/github"))
            .and(header("authorization", "Bearer facade-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "github"})))
            .mount(&server)
            .await;

        let github = test_github(&server);
        github.users().get("octocat").await.unwrap();
        github.organizations().get("github").await.unwrap();

        let rate = github.last_rate_limit(RateCategory::Core).unwrap();
        assert_eq!(rate.remaining, 4999);
    }

    #[tokio::test]
    async fn rate_limits_decodes_resources() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rate_limit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": {
                    "core": {"limit": 5000, "remaining": 4990, "used": 10, "reset": 1700000000},
                    "search": {"limit": 30, "remaining": 30, "used": 0, "reset": 1700000060}
                },
                "rate": {"limit": 5000, "remaining": 4990, "used": 10, "reset": 1700000000}
            })))
            .mount(&server)
            .await;

        let limits = test_github(&server).rate_limits().await.unwrap().into_inner();
        assert_eq!(limits.resources.core.remaining, 4990);
        assert_eq!(limits.resources.search.unwrap().limit, 30);
        assert!(limits.resources.graphql.is_none());
    }

    #[tokio::test]
    async fn custom_requester_receives_every_call() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|req| req.method == Method::GET && req.path == "repos/o/r")
            .times(1)
            .returning(|_| Ok(raw(200, r#"{"id": 1, "name": "r"}"#)));
        transport
            .expect_execute()
            .withf(|req| req.method == Method::DELETE && req.path == "repos/o/r/labels/bug")
            .times(1)
            .returning(|_| Ok(raw(204, "")));

        let github = GitHub::with_requester(Arc::new(transport));
        let repo = github.repositories().get("o", "r").await.unwrap();
        assert_eq!(repo.value.name.as_deref(), Some("r"));

        let meta = github.issues().delete_label("o", "r", "bug").await.unwrap();
        assert_eq!(meta.status, 204);
        assert!(github.last_rate_limit(RateCategory::Core).is_none());
    }

    #[tokio::test]
    async fn custom_requester_errors_propagate() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .returning(|_| Err(Error::Timeout("deadline exceeded".to_string())));

        let github = GitHub::with_requester(Arc::new(transport));
        let err = github.users().get("").await.unwrap_err();
        assert_eq!(err, Error::Timeout("deadline exceeded".to_string()));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = GitHubConfig {
            base_url: "not a url".to_string(),
            ..GitHubConfig::default()
        };
        assert!(GitHub::new(&config).is_err());
    }
}
