//! Issues service implementation.

use crate::models::{
    Issue, IssueComment, IssueListByRepoOptions, IssueListCommentsOptions, IssueListOptions,
    IssueRequest, Label, LockIssueOptions,
};
use crate::Result;
use ghkit_core::ids::CommentId;
use ghkit_core::pagination::ListOptions;
use ghkit_core::path::segment;
use ghkit_core::query::add_options;
use ghkit_core::request::{get_json, send_empty, send_json, ApiRequest, Requester};
use ghkit_core::response::{Response, ResponseMeta};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

/// Media type that adds reactions and lock reasons to issue payloads.
pub const MEDIA_TYPE_REACTIONS: &str = "application/vnd.github.squirrel-girl-preview+json";

/// Endpoints for issues, issue comments and labels.
#[derive(Clone)]
pub struct IssuesService {
    requester: Arc<dyn Requester>,
}

impl IssuesService {
    /// Create the service over a shared requester.
    #[must_use]
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// List issues across visible repositories (`all`) or the authenticated
    /// user's owned and member repositories.
    pub async fn list(
        &self,
        all: bool,
        opts: Option<&IssueListOptions>,
    ) -> Result<Response<Vec<Issue>>> {
        let base = if all { "issues" } else { "user/issues" };
        let path = add_options(base, opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// List issues of a repository. Pull requests are included by GitHub.
    pub async fn list_by_repo(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&IssueListByRepoOptions>,
    ) -> Result<Response<Vec<Issue>>> {
        let path = add_options(&issues_path(owner, repo, "")?, opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// Fetch a single issue.
    pub async fn get(&self, owner: &str, repo: &str, number: u64) -> Result<Response<Issue>> {
        let request = ApiRequest::get(issues_path(owner, repo, &format!("/{number}"))?)
            .with_accept(MEDIA_TYPE_REACTIONS);
        send_json(self.requester.as_ref(), request).await
    }

    /// Open an issue.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        issue: &IssueRequest,
    ) -> Result<Response<Issue>> {
        let request =
            ApiRequest::new(Method::POST, issues_path(owner, repo, "")?).with_json(issue)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// Edit an issue.
    pub async fn edit(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        issue: &IssueRequest,
    ) -> Result<Response<Issue>> {
        let request = ApiRequest::new(
            Method::PATCH,
            issues_path(owner, repo, &format!("/{number}"))?,
        )
        .with_json(issue)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// Clear the milestone of an issue.
    pub async fn remove_milestone(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Response<Issue>> {
        let request = ApiRequest::new(
            Method::PATCH,
            issues_path(owner, repo, &format!("/{number}"))?,
        )
        .with_json(&json!({ "milestone": null }))?;
        send_json(self.requester.as_ref(), request).await
    }

    /// Lock the conversation of an issue.
    pub async fn lock(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        opts: Option<&LockIssueOptions>,
    ) -> Result<ResponseMeta> {
        let mut request = ApiRequest::new(
            Method::PUT,
            issues_path(owner, repo, &format!("/{number}/lock"))?,
        );
        if let Some(opts) = opts {
            request = request.with_json(opts)?;
        }
        send_empty(self.requester.as_ref(), request).await
    }

    /// Unlock the conversation of an issue.
    pub async fn unlock(&self, owner: &str, repo: &str, number: u64) -> Result<ResponseMeta> {
        let path = issues_path(owner, repo, &format!("/{number}/lock"))?;
        send_empty(self.requester.as_ref(), ApiRequest::delete(path)).await
    }

    /// List comments on an issue. `number` 0 lists every comment in the repository.
    pub async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        opts: Option<&IssueListCommentsOptions>,
    ) -> Result<Response<Vec<IssueComment>>> {
        let suffix = if number == 0 {
            "/comments".to_string()
        } else {
            format!("/{number}/comments")
        };
        let path = add_options(&issues_path(owner, repo, &suffix)?, opts)?;
        let request = ApiRequest::get(path).with_accept(MEDIA_TYPE_REACTIONS);
        send_json(self.requester.as_ref(), request).await
    }

    /// Comment on an issue.
    pub async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        comment: &IssueComment,
    ) -> Result<Response<IssueComment>> {
        let request = ApiRequest::new(
            Method::POST,
            issues_path(owner, repo, &format!("/{number}/comments"))?,
        )
        .with_json(comment)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// Edit a comment.
    pub async fn edit_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: CommentId,
        comment: &IssueComment,
    ) -> Result<Response<IssueComment>> {
        let request = ApiRequest::new(
            Method::PATCH,
            issues_path(owner, repo, &format!("/comments/{comment_id}"))?,
        )
        .with_json(comment)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// Delete a comment.
    pub async fn delete_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: CommentId,
    ) -> Result<ResponseMeta> {
        let path = issues_path(owner, repo, &format!("/comments/{comment_id}"))?;
        send_empty(self.requester.as_ref(), ApiRequest::delete(path)).await
    }

    /// List the labels of a repository.
    pub async fn list_labels(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> Result<Response<Vec<Label>>> {
        let path = add_options(&labels_path(owner, repo, None)?, opts)?;
        get_json(self.requester.as_ref(), path).await
    }

    /// Fetch a label by name.
    pub async fn get_label(&self, owner: &str, repo: &str, name: &str) -> Result<Response<Label>> {
        get_json(
            self.requester.as_ref(),
            labels_path(owner, repo, Some(name))?,
        )
        .await
    }

    /// Create a label.
    pub async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        label: &Label,
    ) -> Result<Response<Label>> {
        let request =
            ApiRequest::new(Method::POST, labels_path(owner, repo, None)?).with_json(label)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// Edit (or rename) a label.
    pub async fn edit_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        label: &Label,
    ) -> Result<Response<Label>> {
        let request = ApiRequest::new(Method::PATCH, labels_path(owner, repo, Some(name))?)
            .with_json(label)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// Delete a label.
    pub async fn delete_label(&self, owner: &str, repo: &str, name: &str) -> Result<ResponseMeta> {
        let path = labels_path(owner, repo, Some(name))?;
        send_empty(self.requester.as_ref(), ApiRequest::delete(path)).await
    }

    /// Add labels to an issue, returning the issue's full label set.
    pub async fn add_labels_to_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Response<Vec<Label>>> {
        let request = ApiRequest::new(
            Method::POST,
            issues_path(owner, repo, &format!("/{number}/labels"))?,
        )
        .with_json(labels)?;
        send_json(self.requester.as_ref(), request).await
    }

    /// Remove one label from an issue.
    pub async fn remove_label_for_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<ResponseMeta> {
        let path = issues_path(
            owner,
            repo,
            &format!("/{number}/labels/{}", segment(label)?),
        )?;
        send_empty(self.requester.as_ref(), ApiRequest::delete(path)).await
    }
}

fn issues_path(owner: &str, repo: &str, suffix: &str) -> Result<String> {
    Ok(format!(
        "repos/{}/{}/issues{suffix}",
        segment(owner)?,
        segment(repo)?
    ))
}

fn labels_path(owner: &str, repo: &str, name: Option<&str>) -> Result<String> {
    let base = format!("repos/{}/{}/labels", segment(owner)?, segment(repo)?);
    match name {
        Some(name) => Ok(format!("{base}/{}", segment(name)?)),
        None => Ok(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueSort, IssueState};
    use ghkit_core::client::{RetryPolicy, ServiceClient};
    use ghkit_core::ids::{IssueId, LabelId};
    use ghkit_core::optional;
    use ghkit_core::Error;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_service(server: &MockServer) -> IssuesService {
        let client = ServiceClient::builder(server.uri())
            .unwrap()
            .with_retry_policy(RetryPolicy::no_retry())
            .build()
            .unwrap();
        IssuesService::new(Arc::new(client))
    }

    #[tokio::test]
    async fn list_all_and_user_issues() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/issues"))
            .and(query_param("filter", "all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"number": 1}])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let service = test_service(&server);
        let opts = IssueListOptions {
            filter: optional::string("all"),
            ..IssueListOptions::default()
        };
        let all = service.list(true, Some(&opts)).await.unwrap();
        assert_eq!(all.value[0].number, Some(1));

        let mine = service.list(false, None).await.unwrap();
        assert!(mine.value.is_empty());
    }

    #[tokio::test]
    async fn list_by_repo_with_labels() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/issues"))
            .and(query_param("labels", "bug,ui"))
            .and(query_param("state", "all"))
            .and(query_param("sort", "updated"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 10, "number": 3, "title": "t", "labels": [{"name": "bug"}]}
            ])))
            .mount(&server)
            .await;

        let opts = IssueListByRepoOptions {
            labels: vec!["bug".into(), "ui".into()],
            state: Some(IssueState::All),
            sort: Some(IssueSort::Updated),
            ..IssueListByRepoOptions::default()
        };
        let issues = test_service(&server)
            .list_by_repo("o", "r", Some(&opts))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(issues[0].id, Some(IssueId::new(10)));
        assert_eq!(
            issues[0].labels.as_ref().unwrap()[0].name.as_deref(),
            Some("bug")
        );
    }

    #[tokio::test]
    async fn get_requests_reactions_media_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/issues/5"))
            .and(header("accept", MEDIA_TYPE_REACTIONS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "number": 5,
                "reactions": {"total_count": 1, "+1": 1}
            })))
            .mount(&server)
            .await;

        let issue = test_service(&server).get("o", "r", 5).await.unwrap().value;
        assert_eq!(issue.reactions.unwrap().plus_one, Some(1));
    }

    #[tokio::test]
    async fn create_and_edit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues"))
            .and(body_json(json!({"title": "bug", "labels": ["bug"]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"number": 7, "title": "bug"})))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/repos/o/r/issues/7"))
            .and(body_json(json!({"state": "closed", "state_reason": "completed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"number": 7, "state": "closed"})))
            .mount(&server)
            .await;

        let service = test_service(&server);
        let request = IssueRequest {
            title: optional::string("bug"),
            labels: optional::strings(["bug"]),
            ..IssueRequest::default()
        };
        let created = service.create("o", "r", &request).await.unwrap();
        assert_eq!(created.meta.status, 201);
        assert_eq!(created.value.number, Some(7));

        let close = IssueRequest {
            state: Some(IssueState::Closed),
            state_reason: optional::string("completed"),
            ..IssueRequest::default()
        };
        let edited = service.edit("o", "r", 7, &close).await.unwrap();
        assert_eq!(edited.value.state, Some(IssueState::Closed));
    }

    #[tokio::test]
    async fn create_validation_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "Validation Failed",
                "errors": [{"resource": "Issue", "field": "title", "code": "missing_field"}]
            })))
            .mount(&server)
            .await;

        let err = test_service(&server)
            .create("o", "r", &IssueRequest::default())
            .await
            .unwrap_err();
        let Error::Validation(api) = &err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(api.errors[0].field.as_deref(), Some("title"));
    }

    #[tokio::test]
    async fn remove_milestone_sends_null() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/repos/o/r/issues/2"))
            .and(body_json(json!({"milestone": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"number": 2, "milestone": null})))
            .expect(1)
            .mount(&server)
            .await;

        let issue = test_service(&server)
            .remove_milestone("o", "r", 2)
            .await
            .unwrap();
        assert!(issue.value.milestone.is_none());
    }

    #[tokio::test]
    async fn lock_and_unlock() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/repos/o/r/issues/4/lock"))
            .and(body_json(json!({"lock_reason": "resolved"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/repos/o/r/issues/4/lock"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = test_service(&server);
        let opts = LockIssueOptions {
            lock_reason: optional::string("resolved"),
        };
        assert_eq!(service.lock("o", "r", 4, Some(&opts)).await.unwrap().status, 204);
        assert_eq!(service.unlock("o", "r", 4).await.unwrap().status, 204);
    }

    #[tokio::test]
    async fn list_comments_for_issue_and_repo() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/issues/9/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "body": "a"}])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/issues/comments"))
            .and(query_param("since", "2024-05-01T00:00:00Z"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let service = test_service(&server);
        let comments = service.list_comments("o", "r", 9, None).await.unwrap();
        assert_eq!(comments.value[0].id, Some(CommentId::new(1)));

        let opts = IssueListCommentsOptions {
            since: Some("2024-05-01T00:00:00Z".parse().unwrap()),
            ..IssueListCommentsOptions::default()
        };
        let repo_wide = service.list_comments("o", "r", 0, Some(&opts)).await.unwrap();
        assert!(repo_wide.value.is_empty());
    }

    #[tokio::test]
    async fn comment_lifecycle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues/1/comments"))
            .and(body_json(json!({"body": "first"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 77, "body": "first"})))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/repos/o/r/issues/comments/77"))
            .and(body_json(json!({"body": "edited"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 77, "body": "edited"})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/repos/o/r/issues/comments/77"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = test_service(&server);
        let created = service
            .create_comment(
                "o",
                "r",
                1,
                &IssueComment {
                    body: optional::string("first"),
                    ..IssueComment::default()
                },
            )
            .await
            .unwrap()
            .into_inner();
        let id = created.id.unwrap();

        let edited = service
            .edit_comment(
                "o",
                "r",
                id,
                &IssueComment {
                    body: optional::string("edited"),
                    ..IssueComment::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.value.body.as_deref(), Some("edited"));

        service.delete_comment("o", "r", id).await.unwrap();
    }

    #[tokio::test]
    async fn label_crud_escapes_names() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/labels"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "bug"}])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/labels/help%20wanted"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2, "name": "help wanted"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/labels"))
            .and(body_json(json!({"name": "ui", "color": "ededed"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3, "name": "ui"})))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/repos/o/r/labels/ui"))
            .and(body_json(json!({"name": "frontend"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "name": "frontend"})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/repos/o/r/labels/frontend"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = test_service(&server);
        let labels = service
            .list_labels("o", "r", Some(&ListOptions::new(0, 100)))
            .await
            .unwrap();
        assert_eq!(labels.value.len(), 1);

        let label = service.get_label("o", "r", "help wanted").await.unwrap();
        assert_eq!(label.value.id, Some(LabelId::new(2)));

        let created = service
            .create_label(
                "o",
                "r",
                &Label {
                    name: optional::string("ui"),
                    color: optional::string("ededed"),
                    ..Label::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(created.meta.status, 201);

        let renamed = service
            .edit_label(
                "o",
                "r",
                "ui",
                &Label {
                    name: optional::string("frontend"),
                    ..Label::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.value.name.as_deref(), Some("frontend"));

        service.delete_label("o", "r", "frontend").await.unwrap();
    }

    #[tokio::test]
    async fn issue_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues/3/labels"))
            .and(body_json(json!(["bug", "ui"])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "bug"}, {"name": "ui"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/repos/o/r/issues/3/labels/ui"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "bug"}])))
            .expect(1)
            .mount(&server)
            .await;

        let service = test_service(&server);
        let labels = service
            .add_labels_to_issue("o", "r", 3, &["bug".to_string(), "ui".to_string()])
            .await
            .unwrap();
        assert_eq!(labels.value.len(), 2);

        let meta = service
            .remove_label_for_issue("o", "r", 3, "ui")
            .await
            .unwrap();
        assert_eq!(meta.status, 200);
    }
}
