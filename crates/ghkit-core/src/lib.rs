//! # ghkit-core
//!
//! Core types and utilities for working with the GitHub REST API.
//!
//! This crate provides the shared building blocks of the service crates:
//! error handling, option encoding, pagination, rate limits, configuration and
//! the HTTP client every service method delegates to.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and HTTP status code mapping
//! - [`optional`] - Helpers for "present" values in option structs
//! - [`query`] - Option-struct to query-string encoding
//! - [`path`] - Path segment escaping
//! - [`ids`] - Strongly-typed numeric ids for GitHub resources
//! - [`types`] - Domain types shared by several services
//! - [`pagination`] - List options and `Link` header parsing
//! - [`rate`] - Rate limit headers and the `rate_limit` resource
//! - [`response`] - Decoded responses and their metadata
//! - [`request`] - Requests and the [`Requester`] seam
//! - [`config`] - Configuration for GitHub clients
//! - [`client`] - HTTP client, authentication, retries and rate-limit tracking

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod optional;
pub mod pagination;
pub mod path;
pub mod query;
pub mod rate;
pub mod request;
pub mod response;
pub mod types;

// Re-export commonly used types
pub use client::{ServiceClient, ServiceClientBuilder};
pub use config::GitHubConfig;
pub use error::{ApiError, Error, FieldError, Result};
pub use pagination::{ListOptions, PageLinks};
pub use query::{add_options, QueryParams, QueryValue, ToQuery};
pub use request::{ApiRequest, RawResponse, Requester};
pub use response::{Response, ResponseMeta};
