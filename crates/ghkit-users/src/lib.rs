//! Users API for GitHub.
//!
//! Provides the [`UsersService`] and its option structs for the `/user` and
//! `/users/{user}` endpoints.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::UsersService;
pub use models::{User, UserListOptions};

/// Convenient result alias that reuses the shared ghkit error type.
pub type Result<T> = ghkit_core::Result<T>;
