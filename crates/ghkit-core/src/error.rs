//! Error types for GitHub API operations.
//!
//! Errors fall into three groups: request construction failures that never
//! reach the network, transport failures reported by the HTTP stack, and
//! rejections from the remote API. Rejections keep the response metadata so
//! callers can inspect the status, headers and rate limit that came back.

use crate::rate::RateLimit;
use crate::response::ResponseMeta;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Main error type for GitHub operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The request could not be constructed (bad path parameter, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Option or body encoding failed
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The API could not be reached or kept failing
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Resource not found (404)
    #[error("Not found: {}", .0.message)]
    NotFound(Box<ApiError>),

    /// Missing or bad credentials (401)
    #[error("Unauthorized: {}", .0.message)]
    Unauthorized(Box<ApiError>),

    /// Access denied (403)
    #[error("Forbidden: {}", .0.message)]
    Forbidden(Box<ApiError>),

    /// Conflicting resource state (409)
    #[error("Conflict: {}", .0.message)]
    Conflict(Box<ApiError>),

    /// The request body failed validation (422)
    #[error("Validation failed: {}", .0.message)]
    Validation(Box<ApiError>),

    /// Primary rate limit exhausted
    #[error("Rate limit exceeded: {} (resets at {})", .error.message, .rate.reset)]
    RateLimited {
        /// Error returned (or synthesised) for the request
        error: Box<ApiError>,
        /// Rate limit at the time of the failure
        rate: RateLimit,
    },

    /// Secondary (abuse) rate limit triggered
    #[error("Secondary rate limit: {}", .error.message)]
    SecondaryRateLimit {
        /// Error returned for the request
        error: Box<ApiError>,
        /// Delay the server asked for, if any
        retry_after: Option<Duration>,
    },

    /// Any other non-success response
    #[error("GitHub API error {}: {}", .0.status, .0.message)]
    Api(Box<ApiError>),

    /// The response body did not match the expected shape
    #[error("Failed to parse response: {message}")]
    ParseError {
        /// Decoder message
        message: String,
        /// Metadata of the response that failed to decode
        meta: Option<Box<ResponseMeta>>,
    },
}

/// Specialized result type for GitHub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error payload returned by the API together with the response metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Message from the error body (or the raw body when it is not JSON)
    pub message: String,
    /// Link to the relevant API documentation
    pub documentation_url: Option<String>,
    /// Field level details
    pub errors: Vec<FieldError>,
    /// Metadata of the failed response
    pub meta: ResponseMeta,
}

/// One entry of the `errors` array of an API error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Resource the error applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Field the error applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Validation code (`missing`, `invalid`, `already_exists`, `custom`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Free-form message, used with the `custom` code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Wire shape of an API error body.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    documentation_url: Option<String>,
    // Some endpoints send plain strings instead of objects.
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

impl ApiError {
    /// Build an error from a failed response body.
    #[must_use]
    pub fn from_body(meta: ResponseMeta, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let (message, documentation_url, errors) = match parsed {
            Some(parsed) => (
                parsed.message.unwrap_or_else(|| body.trim().to_string()),
                parsed.documentation_url,
                parsed
                    .errors
                    .into_iter()
                    .map(|value| match value {
                        serde_json::Value::String(message) => FieldError {
                            resource: None,
                            field: None,
                            code: None,
                            message: Some(message),
                        },
                        other => serde_json::from_value(other).unwrap_or(FieldError {
                            resource: None,
                            field: None,
                            code: None,
                            message: None,
                        }),
                    })
                    .collect(),
            ),
            None => (body.trim().to_string(), None, Vec::new()),
        };

        Self {
            status: meta.status,
            message,
            documentation_url,
            errors,
            meta,
        }
    }
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Encoding(_) => "ENCODING_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "UNPROCESSABLE_ENTITY",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::SecondaryRateLimit { .. } => "SECONDARY_RATE_LIMIT",
            Self::Api(_) => "API_ERROR",
            Self::ParseError { .. } => "PARSE_ERROR",
        }
    }

    /// Returns the API error payload, if the remote API produced one.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::NotFound(err)
            | Self::Unauthorized(err)
            | Self::Forbidden(err)
            | Self::Conflict(err)
            | Self::Validation(err)
            | Self::Api(err)
            | Self::RateLimited { error: err, .. }
            | Self::SecondaryRateLimit { error: err, .. } => Some(&**err),
            _ => None,
        }
    }

    /// Returns the metadata of the response that caused this error, if any.
    #[must_use]
    pub fn response_meta(&self) -> Option<&ResponseMeta> {
        match self {
            Self::ParseError { meta, .. } => meta.as_deref(),
            other => other.api_error().map(|err| &err.meta),
        }
    }

    /// Returns the HTTP status code of the failed response, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response_meta().map(|meta| meta.status)
    }

    /// Returns true if the request never left the process.
    #[must_use]
    pub const fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_)
                | Self::Encoding(_)
                | Self::ConfigError(_)
                | Self::InvalidEndpoint(_)
        )
    }

    /// Returns true if the shared client may retry the request.
    ///
    /// Gateway failures (502, 503, 504), timeouts, connection failures and
    /// secondary rate limits are transient; everything else is final.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::ServiceUnavailable(_) | Self::SecondaryRateLimit { .. } => {
                true
            }
            Self::Api(err) => matches!(err.status, 502..=504),
            _ => false,
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: err.to_string(),
            meta: None,
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(format!("Invalid configuration: {err}"))
    }
}
