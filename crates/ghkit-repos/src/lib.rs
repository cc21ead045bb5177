//! Repositories API for GitHub.
//!
//! Provides typed structures and the asynchronous [`RepositoriesService`] for
//! repository listings, settings, contributors, languages, tags, branches and
//! topics.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::RepositoriesService;
pub use models::{
    Branch, BranchListOptions, CommitRef, Contributor, License, ListContributorsOptions,
    Repository, RepositoryListByAuthenticatedUserOptions, RepositoryListByOrgOptions,
    RepositoryListByUserOptions, RepositorySort, RepositoryTag, Topics, Visibility,
};

/// Convenient result alias that reuses the shared ghkit error type.
pub type Result<T> = ghkit_core::Result<T>;
