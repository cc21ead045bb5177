//! Rate limit bookkeeping.
//!
//! GitHub reports the caller's quota on every response through the
//! `X-RateLimit-*` headers. The shared client records the latest values per
//! category so it can refuse requests that are certain to be rejected.

use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header carrying the request quota.
pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
/// Header carrying the remaining requests.
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
/// Header carrying the used requests.
pub const HEADER_USED: &str = "x-ratelimit-used";
/// Header carrying the reset time in epoch seconds.
pub const HEADER_RESET: &str = "x-ratelimit-reset";
/// Header naming the quota bucket.
pub const HEADER_RESOURCE: &str = "x-ratelimit-resource";
/// Header carrying the secondary rate limit delay in seconds.
pub const HEADER_RETRY_AFTER: &str = "retry-after";

/// Rate limit for one quota bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Maximum number of requests per window
    pub limit: u64,
    /// Requests left in the current window
    pub remaining: u64,
    /// Requests already made in the current window
    #[serde(default)]
    pub used: u64,
    /// When the current window resets
    #[serde(with = "chrono::serde::ts_seconds")]
    pub reset: DateTime<Utc>,
    /// Bucket name (`core`, `search`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl RateLimit {
    /// Parse the rate limit headers of a response.
    ///
    /// Returns `None` when the limit, remaining or reset header is missing.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_u64(headers, HEADER_LIMIT)?;
        let remaining = header_u64(headers, HEADER_REMAINING)?;
        let reset_epoch = header_u64(headers, HEADER_RESET)?;
        let reset = Utc
            .timestamp_opt(i64::try_from(reset_epoch).ok()?, 0)
            .single()?;

        Some(Self {
            limit,
            remaining,
            used: header_u64(headers, HEADER_USED).unwrap_or(limit.saturating_sub(remaining)),
            reset,
            resource: headers
                .get(HEADER_RESOURCE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
        })
    }

    /// True if no requests remain and the window has not reset yet.
    #[must_use]
    pub fn is_exhausted_at(&self, now: DateTime<Utc>) -> bool {
        self.remaining == 0 && self.reset > now
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} remaining, resets at {}",
            self.remaining, self.limit, self.reset
        )
    }
}

/// Path of the endpoint reporting every quota.
pub const RATE_LIMIT_PATH: &str = "rate_limit";

/// Quota bucket a request path is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateCategory {
    /// Most REST endpoints
    Core,
    /// `/search/*` endpoints
    Search,
}

impl RateCategory {
    /// Categorise a request path (relative to the API base URL).
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        let path = path.trim_start_matches('/');
        if path == "search" || path.starts_with("search/") {
            Self::Search
        } else {
            Self::Core
        }
    }
}

/// Response of the `rate_limit` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    /// Limits per bucket
    pub resources: RateLimitResources,
}

/// Rate limits per bucket as returned by `rate_limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitResources {
    /// REST API quota
    pub core: RateLimitEntry,
    /// Search API quota
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<RateLimitEntry>,
    /// GraphQL API quota
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphql: Option<RateLimitEntry>,
    /// Code search quota
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_search: Option<RateLimitEntry>,
}

/// One bucket of the `rate_limit` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitEntry {
    /// Maximum number of requests per window
    pub limit: u64,
    /// Requests left in the current window
    pub remaining: u64,
    /// Requests already made in the current window
    #[serde(default)]
    pub used: u64,
    /// When the current window resets
    #[serde(with = "chrono::serde::ts_seconds")]
    pub reset: DateTime<Utc>,
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn parses_rate_limit_headers() {
        let rate = RateLimit::from_headers(&headers(&[
            (HEADER_LIMIT, "5000"),
            (HEADER_REMAINING, "4987"),
            (HEADER_USED, "13"),
            (HEADER_RESET, "1372700873"),
            (HEADER_RESOURCE, "core"),
        ]))
        .unwrap();

        assert_eq!(rate.limit, 5000);
        assert_eq!(rate.remaining, 4987);
        assert_eq!(rate.used, 13);
        assert_eq!(rate.reset.timestamp(), 1_372_700_873);
        assert_eq!(rate.resource.as_deref(), Some("core"));
    }

    #[test]
    fn missing_headers_yield_none() {
        assert!(RateLimit::from_headers(&headers(&[(HEADER_LIMIT, "60")])).is_none());
    }

    #[test]
    fn used_defaults_to_difference() {
        let rate = RateLimit::from_headers(&headers(&[
            (HEADER_LIMIT, "60"),
            (HEADER_REMAINING, "50"),
            (HEADER_RESET, "1372700873"),
        ]))
        .unwrap();
        assert_eq!(rate.used, 10);
    }

    #[test]
    fn exhaustion_depends_on_reset() {
        let now = Utc::now();
        let mut rate = RateLimit {
            limit: 60,
            remaining: 0,
            used: 60,
            reset: now + chrono::Duration::minutes(5),
            resource: None,
        };
        assert!(rate.is_exhausted_at(now));

        rate.reset = now - chrono::Duration::minutes(1);
        assert!(!rate.is_exhausted_at(now));
    }

    #[test]
    fn categorises_paths() {
        assert_eq!(RateCategory::for_path("search/issues?q=x"), RateCategory::Search);
        assert_eq!(RateCategory::for_path("/search/code"), RateCategory::Search);
        assert_eq!(RateCategory::for_path("repos/o/r"), RateCategory::Core);
    }

    #[test]
    fn decodes_rate_limit_endpoint() {
        let body = r#"{
            "resources": {
                "core": {"limit": 5000, "remaining": 4999, "reset": 1372700873, "used": 1},
                "search": {"limit": 30, "remaining": 18, "reset": 1372697452, "used": 12}
            },
            "rate": {"limit": 5000, "remaining": 4999, "reset": 1372700873, "used": 1}
        }"#;
        let limits: RateLimits = serde_json::from_str(body).unwrap();
        assert_eq!(limits.resources.core.remaining, 4999);
        assert_eq!(limits.resources.search.unwrap().limit, 30);
        assert!(limits.resources.graphql.is_none());
    }
}
