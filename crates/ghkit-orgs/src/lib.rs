//! Organizations API for GitHub.
//!
//! Provides typed structures and the asynchronous [`OrganizationsService`]
//! for organization listings, settings and membership.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::OrganizationsService;
pub use models::{
    ListMembersOptions, MemberFilter, MemberRole, Organization, OrganizationsListOptions,
};

/// Convenient result alias that reuses the shared ghkit error type.
pub type Result<T> = ghkit_core::Result<T>;
