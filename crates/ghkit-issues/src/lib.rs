//! Issues API for GitHub.
//!
//! Provides typed structures and the asynchronous [`IssuesService`] for
//! issues, issue comments and repository labels.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{IssuesService, MEDIA_TYPE_REACTIONS};
pub use models::{
    Issue, IssueComment, IssueListByRepoOptions, IssueListCommentsOptions, IssueListOptions,
    IssueRequest, IssueSort, IssueState, Label, LockIssueOptions, Milestone, PullRequestLinks,
};

/// Convenient result alias that reuses the shared ghkit error type.
pub type Result<T> = ghkit_core::Result<T>;
