//! Decoded responses and their metadata.

use crate::pagination::PageLinks;
use crate::rate::RateLimit;
use reqwest::header::HeaderMap;

/// Header carrying GitHub's request id.
pub const HEADER_REQUEST_ID: &str = "x-github-request-id";

/// Everything about a response except its body.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMeta {
    /// HTTP status code
    pub status: u16,
    /// Raw response headers
    pub headers: HeaderMap,
    /// Pagination links from the `Link` header
    pub pages: PageLinks,
    /// Rate limit from the `X-RateLimit-*` headers
    pub rate: Option<RateLimit>,
    /// `X-GitHub-Request-Id`, useful when reporting problems to GitHub
    pub request_id: Option<String>,
    /// `ETag` of the response
    pub etag: Option<String>,
}

impl ResponseMeta {
    /// Extract the metadata from a status and header map.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let request_id = header(HEADER_REQUEST_ID);
        let etag = header(reqwest::header::ETAG.as_str());

        Self {
            status,
            pages: PageLinks::from_headers(&headers),
            rate: RateLimit::from_headers(&headers),
            request_id,
            etag,
            headers,
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// A decoded response body together with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    /// Decoded body
    pub value: T,
    /// Status, headers, pagination and rate limit
    pub meta: ResponseMeta,
}

impl<T> Response<T> {
    /// Wrap a decoded value.
    #[must_use]
    pub const fn new(value: T, meta: ResponseMeta) -> Self {
        Self { value, meta }
    }

    /// Discard the metadata.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Split into value and metadata.
    #[must_use]
    pub fn into_parts(self) -> (T, ResponseMeta) {
        (self.value, self.meta)
    }

    /// Transform the value, keeping the metadata.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            value: f(self.value),
            meta: self.meta,
        }
    }

    /// Pagination links of this response.
    #[must_use]
    pub const fn pages(&self) -> &PageLinks {
        &self.meta.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn extracts_metadata_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "link",
            HeaderValue::from_static(r#"<https://api.github.com/user/repos?page=2>; rel="next""#),
        );
        headers.insert("x-github-request-id", HeaderValue::from_static("CAFE:1234"));
        headers.insert("etag", HeaderValue::from_static(r#"W/"abc""#));
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("60"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("59"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));

        let meta = ResponseMeta::new(200, headers);
        assert!(meta.is_success());
        assert_eq!(meta.pages.next, Some(2));
        assert_eq!(meta.request_id.as_deref(), Some("CAFE:1234"));
        assert_eq!(meta.etag.as_deref(), Some(r#"W/"abc""#));
        assert_eq!(meta.rate.unwrap().remaining, 59);
    }

    #[test]
    fn map_keeps_metadata() {
        let meta = ResponseMeta::new(201, HeaderMap::new());
        let response = Response::new(vec![1, 2, 3], meta).map(|v| v.len());
        assert_eq!(response.value, 3);
        assert_eq!(response.meta.status, 201);
        assert!(!response.pages().has_next());
    }
}
