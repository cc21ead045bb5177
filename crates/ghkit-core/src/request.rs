//! Requests, the [`Requester`] seam, and typed send helpers.
//!
//! Service crates never talk to the HTTP stack directly: they build an
//! [`ApiRequest`], hand it to a [`Requester`] (normally the shared
//! [`ServiceClient`](crate::client::ServiceClient)) and decode the
//! [`RawResponse`] with the helpers below.

use crate::error::{ApiError, Error, Result};
use crate::response::{Response, ResponseMeta};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path (and encoded query) relative to the base URL
    pub path: String,
    /// JSON body, if any
    pub body: Option<serde_json::Value>,
    /// Media type override for the `Accept` header
    pub accept: Option<String>,
}

impl ApiRequest {
    /// Request without a body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            accept: None,
        }
    }

    /// `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the body cannot be serialized.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|err| Error::Encoding(format!("failed to encode request body: {err}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Override the `Accept` media type.
    #[must_use]
    pub fn with_accept(mut self, media_type: impl Into<String>) -> Self {
        self.accept = Some(media_type.into());
        self
    }
}

/// A response whose body has not been decoded yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// Status, headers, pagination and rate limit
    pub meta: ResponseMeta,
    /// Response body as text
    pub body: String,
}

/// Something that can execute API requests.
///
/// Implementations own transport, authentication, rate limiting and retries;
/// they return `Ok` only for successful (2xx) responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Requester: Send + Sync {
    /// Execute a request.
    ///
    /// # Errors
    ///
    /// Returns transport errors and the mapped error for non-2xx responses.
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// Execute a request and decode its JSON body.
///
/// # Errors
///
/// Propagates the requester's error, or [`Error::ParseError`] when the body
/// does not match `T`.
pub async fn send_json<T>(requester: &dyn Requester, request: ApiRequest) -> Result<Response<T>>
where
    T: DeserializeOwned,
{
    let path = request.path.clone();
    let raw = requester.execute(request).await?;
    decode(&path, raw)
}

/// Execute a `GET` request and decode its JSON body.
///
/// # Errors
///
/// See [`send_json`].
pub async fn get_json<T>(requester: &dyn Requester, path: impl Into<String>) -> Result<Response<T>>
where
    T: DeserializeOwned,
{
    send_json(requester, ApiRequest::get(path)).await
}

/// Execute a request whose response body is ignored.
///
/// # Errors
///
/// Propagates the requester's error.
pub async fn send_empty(requester: &dyn Requester, request: ApiRequest) -> Result<ResponseMeta> {
    requester.execute(request).await.map(|raw| raw.meta)
}

/// Execute a membership-style check: 204 means `true`, 404 means `false`.
///
/// # Errors
///
/// Propagates every error other than [`Error::NotFound`].
pub async fn send_bool(requester: &dyn Requester, request: ApiRequest) -> Result<Response<bool>> {
    match requester.execute(request).await {
        Ok(raw) => Ok(Response::new(raw.meta.status == 204, raw.meta)),
        Err(Error::NotFound(err)) => {
            let ApiError { meta, .. } = *err;
            Ok(Response::new(false, meta))
        }
        Err(err) => Err(err),
    }
}

fn decode<T: DeserializeOwned>(path: &str, raw: RawResponse) -> Result<Response<T>> {
    let RawResponse { meta, body } = raw;
    // 204 responses decode as JSON null so unit-like targets still work.
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };

    match serde_json::from_str(body) {
        Ok(value) => Ok(Response::new(value, meta)),
        Err(err) => Err(Error::ParseError {
            message: format!("failed to decode response for `{path}`: {err}"),
            meta: Some(Box::new(meta)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        id: Option<i64>,
        name: Option<String>,
    }

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            meta: ResponseMeta::new(status, HeaderMap::new()),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn send_json_decodes_body() {
        let mut mock = MockRequester::new();
        mock.expect_execute()
            .withf(|req| req.method == Method::GET && req.path == "things/1")
            .times(1)
            .returning(|_| Ok(raw(200, r#"{"id":1,"name":"n"}"#)));

        let response: Response<Named> = get_json(&mock, "things/1").await.unwrap();
        assert_eq!(response.value.id, Some(1));
        assert_eq!(response.value.name.as_deref(), Some("n"));
        assert_eq!(response.meta.status, 200);
    }

    #[tokio::test]
    async fn decode_failure_keeps_metadata() {
        let mut mock = MockRequester::new();
        mock.expect_execute()
            .returning(|_| Ok(raw(200, r#"{"id":"not a number"}"#)));

        let err = get_json::<Named>(&mock, "things/1").await.unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn send_json_attaches_body() {
        let mut mock = MockRequester::new();
        mock.expect_execute()
            .withf(|req| {
                req.method == Method::POST
                    && req.body == Some(serde_json::json!({"name": "n"}))
            })
            .returning(|_| Ok(raw(201, r#"{"id":2}"#)));

        let request = ApiRequest::new(Method::POST, "things")
            .with_json(&serde_json::json!({"name": "n"}))
            .unwrap();
        let response: Response<Named> = send_json(&mock, request).await.unwrap();
        assert_eq!(response.value.id, Some(2));
        assert_eq!(response.meta.status, 201);
    }

    #[tokio::test]
    async fn send_bool_maps_statuses() {
        let mut mock = MockRequester::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(raw(204, "")));
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(Error::NotFound(Box::new(ApiError::from_body(
                    ResponseMeta::new(404, HeaderMap::new()),
                    "",
                ))))
            });
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(Error::HttpError("boom".to_string())));

        assert!(send_bool(&mock, ApiRequest::get("a")).await.unwrap().value);
        assert!(!send_bool(&mock, ApiRequest::get("a")).await.unwrap().value);
        assert!(send_bool(&mock, ApiRequest::get("a")).await.is_err());
    }

    #[tokio::test]
    async fn empty_body_decodes_as_unit() {
        let mut mock = MockRequester::new();
        mock.expect_execute().returning(|_| Ok(raw(204, "")));

        let response: Response<()> = get_json(&mock, "a").await.unwrap();
        assert_eq!(response.meta.status, 204);
    }

    #[test]
    fn with_accept_sets_media_type() {
        let request = ApiRequest::delete("a").with_accept("application/vnd.github.raw+json");
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(
            request.accept.as_deref(),
            Some("application/vnd.github.raw+json")
        );
    }
}
