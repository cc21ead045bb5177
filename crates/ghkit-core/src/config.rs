//! Configuration for GitHub clients.
//!
//! [`GitHubConfig`] is the serializable, validated description of how to
//! reach the API: which base URL, which credentials, and how patient to be.

use crate::client::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Environment variables checked for a token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Environment variable overriding the API base URL.
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";

/// Configuration for a GitHub client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GitHubConfig {
    /// API base URL (`https://api.github.com/` or an Enterprise Server URL)
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Personal access token or installation token
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of retry attempts
    #[validate(range(min = 0, max = 10))]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// `User-Agent` header value (GitHub rejects requests without one)
    #[validate(length(min = 1))]
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// `X-GitHub-Api-Version` header value
    #[validate(length(min = 1))]
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_max_retries() -> u32 {
    3
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl GitHubConfig {
    /// Create a configuration for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };
        config.check()?;
        Ok(config)
    }

    /// Build a configuration from `GITHUB_TOKEN`/`GH_TOKEN` and `GITHUB_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if `GITHUB_API_URL` is set to an invalid URL.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the looked-up base URL is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV_VAR).filter(|url| !url.trim().is_empty()) {
            config.base_url = url;
        }
        config.token = TOKEN_ENV_VARS
            .iter()
            .find_map(|name| lookup(name).filter(|token| !token.trim().is_empty()))
            .map(SecretString::from);

        config.check()?;
        Ok(config)
    }

    /// Set the token used for authentication.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Point the configuration at a GitHub Enterprise Server instance.
    ///
    /// `api/v3/` is appended unless the URL already ends with it or names an
    /// `api.` host.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn with_enterprise_url(mut self, url: &str) -> Result<Self, Error> {
        let mut parsed = Url::parse(url)
            .map_err(|e| Error::ConfigError(format!("Invalid enterprise URL: {e}")))?;
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        let host = parsed.host_str().unwrap_or_default();
        let api_host = host.starts_with("api.") || host.contains(".api.");
        if !parsed.path().ends_with("/api/v3/") && !api_host {
            parsed = parsed
                .join("api/v3/")
                .map_err(|e| Error::ConfigError(format!("Invalid enterprise URL: {e}")))?;
        }

        self.base_url = parsed.to_string();
        Ok(self)
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set maximum retry attempts.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Pin a different REST API version.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration, mapping failures to [`Error::ConfigError`].
    ///
    /// # Errors
    ///
    /// Returns an error describing the invalid fields.
    pub fn check(&self) -> Result<(), Error> {
        self.validate().map_err(Error::from)
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            user_agent: default_user_agent(),
            api_version: default_api_version(),
        }
    }
}
