//! Repositories service implementation.

use crate::models::{
    Branch, BranchListOptions, Contributor, ListContributorsOptions, Repository,
    RepositoryListByAuthenticatedUserOptions, RepositoryListByOrgOptions,
    RepositoryListByUserOptions, RepositoryTag, Topics,
};
use crate::Result;
use ghkit_core::ids::RepositoryId;
use ghkit_core::pagination::ListOptions;
use ghkit_core::path::segment;
use ghkit_core::query::add_options;
use ghkit_core::request::{get_json, send_empty, send_json, ApiRequest, Requester};
use ghkit_core::response::{Response, ResponseMeta};
use reqwest::Method;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Endpoints under `/repos/{owner}/{repo}` and the repository listings.
#[derive(Clone)]
pub struct RepositoriesService {
    requester: Arc<dyn Requester>,
}

impl RepositoriesService {
    /// Create the service over a shared requester.
    #[must_use]
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// List repositories the authenticated user can access.
    pub async fn list_by_authenticated_user(
        &self,
        opts: Option<&RepositoryListByAuthenticatedUserOptions>,
    ) -> Result<Response<Vec<Repository>>> {
        let path = add_options("user/repos", opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// List public repositories of a user.
    pub async fn list_by_user(
        &self,
        user: &str,
        opts: Option<&RepositoryListByUserOptions>,
    ) -> Result<Response<Vec<Repository>>> {
        let path = add_options(&format!("users/{}/repos", segment(user)?), opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// List repositories of an organization.
    pub async fn list_by_org(
        &self,
        org: &str,
        opts: Option<&RepositoryListByOrgOptions>,
    ) -> Result<Response<Vec<Repository>>> {
        let path = add_options(&format!("orgs/{}/repos", segment(org)?), opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// Fetch a repository.
    pub async fn get(&self, owner: &str, repo: &str) -> Result<Response<Repository>> {
        get_json(self.requester.as_ref(), repo_path(owner, repo, "")?).await
    }

    /// Fetch a repository by numeric id.
    pub async fn get_by_id(&self, id: RepositoryId) -> Result<Response<Repository>> {
        get_json(self.requester.as_ref(), format!("repositories/{id}")).await
    }

    /// Create a repository. An empty `org` creates it for the authenticated user.
    pub async fn create(&self, org: &str, repo: &Repository) -> Result<Response<Repository>> {
        let path = if org.is_empty() {
            "user/repos".to_string()
        } else {
            format!("orgs/{}/repos", segment(org)?)
        };
        let request = ApiRequest::new(Method::POST, path).with_json(repo)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// Update repository settings.
    pub async fn edit(
        &self,
        owner: &str,
        repo: &str,
        update: &Repository,
    ) -> Result<Response<Repository>> {
        let request =
            ApiRequest::new(Method::PATCH, repo_path(owner, repo, "")?).with_json(update)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// Delete a repository.
    pub async fn delete(&self, owner: &str, repo: &str) -> Result<ResponseMeta> {
        send_empty(
            self.requester.as_ref(),
            ApiRequest::delete(repo_path(owner, repo, "")?),
        )
        .await
    }

    /// List contributors sorted by number of commits.
    pub async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListContributorsOptions>,
    ) -> Result<Response<Vec<Contributor>>> {
        let path = add_options(&repo_path(owner, repo, "/contributors")?, opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// Bytes of code per language.
    pub async fn list_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Response<BTreeMap<String, u64>>> {
        get_json(
            self.requester.as_ref(),
            repo_path(owner, repo, "/languages")?,
        )
        .await
    }

    /// List tags.
    pub async fn list_tags(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> Result<Response<Vec<RepositoryTag>>> {
        let path = add_options(&repo_path(owner, repo, "/tags")?, opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// List branches.
    pub async fn list_branches(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&BranchListOptions>,
    ) -> Result<Response<Vec<Branch>>> {
        let path = add_options(&repo_path(owner, repo, "/branches")?, opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// Fetch a branch. Slashes in the branch name are escaped.
    pub async fn get_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Response<Branch>> {
        let path = format!(
            "{}/{}",
            repo_path(owner, repo, "/branches")?,
            segment(branch)?
        );
        get_json(self.requester.as_ref(), path).await
    }

    /// List topic names.
    pub async fn list_all_topics(&self, owner: &str, repo: &str) -> Result<Response<Vec<String>>> {
        let response: Response<Topics> =
            get_json(self.requester.as_ref(), repo_path(owner, repo, "/topics")?).await?;
        Ok(response.map(|topics| topics.names))
    }

    /// Replace all topics. An empty slice clears them.
    pub async fn replace_all_topics(
        &self,
        owner: &str,
        repo: &str,
        topics: &[String],
    ) -> Result<Response<Vec<String>>> {
        let body = Topics {
            names: topics.to_vec(),
        };
        let request =
            ApiRequest::new(Method::PUT, repo_path(owner, repo, "/topics")?).with_json(&body)?;
        let response: Response<Topics> = send_json(self.requester.as_ref(), request).await?;
        Ok(response.map(|topics| topics.names))
    }
}

fn repo_path(owner: &str, repo: &str, suffix: &str) -> Result<String> {
    Ok(format!(
        "repos/{}/{}{suffix}",
        segment(owner)?,
        segment(repo)?
    ))
}
