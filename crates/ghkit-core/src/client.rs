//! The shared HTTP client and its retry logic.
//!
//! Every service crate sends its requests through one [`ServiceClient`]. It
//! owns the connection pool, the authentication and media-type headers, the
//! rate limit bookkeeping, and the retry loop.

use crate::config::GitHubConfig;
use crate::error::{ApiError, Error, Result};
use crate::rate::{RateCategory, RateLimit, HEADER_RETRY_AFTER, RATE_LIMIT_PATH};
use crate::request::{ApiRequest, RawResponse, Requester};
use crate::response::ResponseMeta;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

/// Default media type sent in the `Accept` header.
pub const MEDIA_TYPE_JSON: &str = "application/vnd.github+json";

/// Default REST API version.
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Header selecting the REST API version.
pub const HEADER_API_VERSION: &str = "x-github-api-version";

/// Default `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("ghkit/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

// Retry settings

/// Default maximum number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default initial retry delay in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Default maximum retry delay in milliseconds (for exponential backoff)
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 5000;

/// Longest `Retry-After` the client will sleep through on a secondary rate limit.
pub const DEFAULT_MAX_RETRY_AFTER_SECS: u64 = 60;

/// Retry policy with exponential backoff.
///
/// Configures how requests are retried after gateway failures, connection
/// failures and secondary rate limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,

    /// Initial delay before first retry
    pub initial_delay: Duration,

    /// Maximum delay between retries (cap for exponential backoff)
    pub max_delay: Duration,

    /// Backoff multiplier (typically 2 for exponential backoff)
    pub backoff_multiplier: u32,

    /// Longest server-requested `Retry-After` that is honoured
    pub max_retry_after: Duration,
}

impl RetryPolicy {
    /// Create a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_RETRY_MAX_DELAY_MS),
            backoff_multiplier: 2,
            max_retry_after: Duration::from_secs(DEFAULT_MAX_RETRY_AFTER_SECS),
        }
    }

    /// Create a retry policy with no retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(0),
            max_delay: Duration::from_millis(0),
            backoff_multiplier: 1,
            max_retry_after: Duration::from_secs(0),
        }
    }

    /// Set the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the initial delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier.
    #[must_use]
    pub const fn with_backoff_multiplier(mut self, multiplier: u32) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Set the longest `Retry-After` that is honoured.
    #[must_use]
    pub const fn with_max_retry_after(mut self, delay: Duration) -> Self {
        self.max_retry_after = delay;
        self
    }

    /// Calculate delay for a given attempt number.
    ///
    /// Uses exponential backoff: delay = min(initial_delay * multiplier^(attempt-1), max_delay)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let multiplier = self.backoff_multiplier.saturating_pow(attempt - 1);
        let initial_ms = u64::try_from(self.initial_delay.as_millis()).unwrap_or(u64::MAX);
        let delay = Duration::from_millis(initial_ms.saturating_mul(u64::from(multiplier)));

        std::cmp::min(delay, self.max_delay)
    }

    /// Check if retries are enabled.
    #[must_use]
    pub const fn has_retries(&self) -> bool {
        self.max_retries > 0
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client configuration.
///
/// Configures timeouts, retries, connection pooling and compression.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connect timeout
    pub connect_timeout: Duration,

    /// Retry policy
    pub retry_policy: RetryPolicy,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            retry_policy: RetryPolicy::new(),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Disable retries.
    #[must_use]
    pub const fn without_retries(mut self) -> Self {
        self.retry_policy = RetryPolicy::no_retry();
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    base_url: Url,
    token: Option<SecretString>,
    user_agent: String,
    api_version: String,
    http_config: ClientConfig,
}

impl ServiceClientBuilder {
    /// Create a builder for the specified base URL.
    ///
    /// A trailing slash is added to the base URL when missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url.as_ref())?,
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            http_config: ClientConfig::new(),
        })
    }

    /// Create a builder from a validated [`GitHubConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        config.check()?;

        let retry_policy = RetryPolicy::new().with_max_retries(config.max_retries);
        let http_config = ClientConfig::new()
            .with_timeout(config.timeout())
            .with_retry_policy(retry_policy);

        let mut builder = Self::new(&config.base_url)?
            .with_user_agent(config.user_agent.clone())
            .with_api_version(config.api_version.clone())
            .with_http_config(http_config);
        builder.token.clone_from(&config.token);
        Ok(builder)
    }

    /// Authenticate with a personal access token or app installation token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the `X-GitHub-Api-Version` header.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Override the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.http_config.retry_policy = retry;
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<ServiceClient> {
        let http = ClientBuilder::new()
            .user_agent(self.user_agent)
            .timeout(self.http_config.timeout)
            .connect_timeout(self.http_config.connect_timeout)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .gzip(self.http_config.enable_compression)
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(ServiceClient {
            http,
            base_url: self.base_url,
            token: self.token,
            api_version: self.api_version,
            retry_policy: self.http_config.retry_policy,
            rate_limits: Arc::new(RwLock::new(HashMap::new())),
        })
    }
}

/// Shared asynchronous client for the GitHub REST API.
///
/// Cloning is cheap; clones share the connection pool and the rate limit state.
#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: Url,
    token: Option<SecretString>,
    api_version: String,
    retry_policy: RetryPolicy,
    rate_limits: Arc<RwLock<HashMap<RateCategory, RateLimit>>>,
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .field("api_version", &self.api_version)
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    /// Start a builder for the specified base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the URL cannot be parsed.
    pub fn builder(base_url: impl AsRef<str>) -> Result<ServiceClientBuilder> {
        ServiceClientBuilder::new(base_url)
    }

    /// Construct an unauthenticated client for the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        ServiceClientBuilder::new(DEFAULT_BASE_URL)?.build()
    }

    /// Construct a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        ServiceClientBuilder::from_config(config)?.build()
    }

    /// Return the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Last rate limit observed for a category.
    #[must_use]
    pub fn rate_limit(&self, category: RateCategory) -> Option<RateLimit> {
        self.rate_limits
            .read()
            .ok()
            .and_then(|limits| limits.get(&category).cloned())
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid path `{path}`: {err}")))
    }

    fn record_rate(&self, category: RateCategory, rate: &RateLimit) {
        if let Ok(mut limits) = self.rate_limits.write() {
            limits.insert(category, rate.clone());
        }
    }

    /// Refuse requests that the last known rate limit guarantees will fail.
    fn check_rate_limit(&self, category: RateCategory) -> Result<()> {
        let Some(rate) = self.rate_limit(category) else {
            return Ok(());
        };
        if !rate.is_exhausted_at(Utc::now()) {
            return Ok(());
        }

        warn!(?category, reset = %rate.reset, "rate limit exhausted, not sending request");
        let meta = ResponseMeta {
            rate: Some(rate.clone()),
            ..ResponseMeta::new(StatusCode::FORBIDDEN.as_u16(), HeaderMap::new())
        };
        let message = format!(
            "API rate limit of {} still exceeded until {}, not making remote request",
            rate.limit, rate.reset
        );
        let error = ApiError {
            status: meta.status,
            message,
            documentation_url: None,
            errors: Vec::new(),
            meta,
        };
        Err(Error::RateLimited {
            error: Box::new(error),
            rate,
        })
    }

    fn retry_delay(&self, method: &Method, error: &Error, attempt: u32) -> Option<Duration> {
        match error {
            Error::SecondaryRateLimit { retry_after, .. } => match retry_after {
                Some(delay) if *delay <= self.retry_policy.max_retry_after => Some(*delay),
                Some(_) => None,
                None => Some(self.retry_policy.delay_for_attempt(attempt)),
            },
            _ if method.is_idempotent() => Some(self.retry_policy.delay_for_attempt(attempt)),
            _ => None,
        }
    }
}

#[async_trait]
impl Requester for ServiceClient {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let category = RateCategory::for_path(&request.path);
        // `rate_limit` itself is free and must work while the quota is exhausted.
        if request.path.trim_start_matches('/') != RATE_LIMIT_PATH {
            self.check_rate_limit(category)?;
        }
        let url = self.build_url(&request.path)?;

        let mut attempt = 0;
        loop {
            let mut builder = self
                .http
                .request(request.method.clone(), url.clone())
                .header(ACCEPT, request.accept.as_deref().unwrap_or(MEDIA_TYPE_JSON))
                .header(HEADER_API_VERSION, &self.api_version);
            if let Some(token) = &self.token {
                builder = builder.bearer_auth(token.expose_secret());
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            info!(method = %request.method, path = %request.path, attempt, "GitHub request");

            let error = match builder.send().await {
                Ok(response) => {
                    let status = response.status();
                    let headers = response.headers().clone();
                    let body = response.text().await?;
                    let meta = ResponseMeta::new(status.as_u16(), headers);
                    if let Some(rate) = &meta.rate {
                        self.record_rate(category, rate);
                    }

                    if status.is_success() {
                        return Ok(RawResponse { meta, body });
                    }
                    map_status_to_error(meta, &body)
                }
                Err(err) => Error::from(err),
            };

            if let Error::RateLimited { rate, .. } = &error {
                warn!(path = %request.path, reset = %rate.reset, "GitHub rate limit exceeded");
            }

            attempt += 1;
            if !error.is_retryable() || attempt > self.retry_policy.max_retries {
                return Err(error);
            }
            let Some(delay) = self.retry_delay(&request.method, &error, attempt) else {
                return Err(error);
            };

            if delay > Duration::from_millis(0) {
                debug!("Retrying GitHub request after {:?}", delay);
                sleep(delay).await;
            }
        }
    }
}

/// Map a non-2xx response to the error taxonomy.
#[must_use]
pub fn map_status_to_error(meta: ResponseMeta, body: &str) -> Error {
    let rate = meta.rate.clone();
    let retry_after = meta
        .headers
        .get(HEADER_RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs);
    let error = Box::new(ApiError::from_body(meta, body));

    match StatusCode::from_u16(error.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR) {
        StatusCode::UNAUTHORIZED => Error::Unauthorized(error),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            if let Some(rate) = rate.filter(|rate| rate.remaining == 0) {
                return Error::RateLimited { error, rate };
            }
            if retry_after.is_some()
                || error.status == StatusCode::TOO_MANY_REQUESTS.as_u16()
                || is_secondary_rate_limit(&error)
            {
                return Error::SecondaryRateLimit { error, retry_after };
            }
            Error::Forbidden(error)
        }
        StatusCode::NOT_FOUND => Error::NotFound(error),
        StatusCode::CONFLICT => Error::Conflict(error),
        StatusCode::UNPROCESSABLE_ENTITY => Error::Validation(error),
        _ => Error::Api(error),
    }
}

fn is_secondary_rate_limit(error: &ApiError) -> bool {
    let documented = error.documentation_url.as_deref().is_some_and(|url| {
        url.ends_with("#abuse-rate-limits") || url.ends_with("secondary-rate-limits")
    });
    documented || error.message.to_lowercase().contains("secondary rate limit")
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|err| Error::InvalidEndpoint(format!("Invalid base URL `{base_url}`: {err}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
