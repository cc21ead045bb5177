//! Pagination options and `Link` header parsing.

use crate::query::{QueryParams, ToQuery};
use reqwest::header::HeaderMap;
use url::Url;

/// Page-number pagination shared by most list endpoints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Page of results to fetch (omitted when zero).
    pub page: u32,
    /// Results per page, at most 100 (omitted when zero).
    pub per_page: u32,
}

impl ListOptions {
    /// Options for a given page and page size.
    #[must_use]
    pub const fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Options for the page following the current response, if there is one.
    #[must_use]
    pub fn next(&self, links: &PageLinks) -> Option<Self> {
        links.next.map(|page| Self {
            page,
            per_page: self.per_page,
        })
    }
}

impl ToQuery for ListOptions {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_nonzero("page", self.page);
        params.push_nonzero("per_page", self.per_page);
    }
}

/// Pagination state extracted from a response's `Link` header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageLinks {
    /// Next page number.
    pub next: Option<u32>,
    /// Previous page number.
    pub prev: Option<u32>,
    /// First page number.
    pub first: Option<u32>,
    /// Last page number.
    pub last: Option<u32>,
    /// Next page value when it is not numeric.
    pub next_page_token: Option<String>,
    /// Cursor of the next page for cursor paginated endpoints.
    pub cursor: Option<String>,
    /// `before` cursor of the previous page.
    pub before: Option<String>,
    /// `after` cursor of the next page.
    pub after: Option<String>,
}

impl PageLinks {
    /// Parse the `Link` header of a response. Missing or malformed links are ignored.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(reqwest::header::LINK)
            .and_then(|value| value.to_str().ok())
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// Parse a raw `Link` header value.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let mut links = Self::default();

        for link in header.split(',') {
            let mut segments = link.trim().split(';');
            let Some(target) = segments.next().map(str::trim) else {
                continue;
            };
            let rels: Vec<&str> = segments.map(str::trim).collect();
            if rels.is_empty() {
                continue;
            }
            let Some(target) = target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
                continue;
            };
            let Ok(url) = Url::parse(target) else {
                continue;
            };

            let value_of = |name: &str| {
                url.query_pairs()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value.into_owned())
                    .filter(|value| !value.is_empty())
            };

            if let Some(cursor) = value_of("cursor") {
                if rels.contains(&r#"rel="next""#) {
                    links.cursor = Some(cursor);
                }
                continue;
            }

            let since = value_of("since");
            let before = value_of("before");
            let after = value_of("after");
            let Some(page) = value_of("page").or(since).or_else(|| {
                (before.is_some() || after.is_some()).then(String::new)
            }) else {
                continue;
            };
            let number = page.parse::<u32>().ok();

            for rel in &rels {
                match *rel {
                    r#"rel="next""# => {
                        links.next = number;
                        if number.is_none() && !page.is_empty() {
                            links.next_page_token = Some(page.clone());
                        }
                        links.after.clone_from(&after);
                    }
                    r#"rel="prev""# => {
                        links.prev = number;
                        links.before.clone_from(&before);
                    }
                    r#"rel="first""# => links.first = number,
                    r#"rel="last""# => links.last = number,
                    _ => {}
                }
            }
        }

        links
    }

    /// True if the response has a following page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
            || self.next_page_token.is_some()
            || self.cursor.is_some()
            || self.after.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::add_options;

    #[test]
    fn parses_page_links() {
        let header = r#"<https://api.github.com/user/repos?page=3&per_page=100>; rel="next", <https://api.github.com/user/repos?page=1&per_page=100>; rel="prev", <https://api.github.com/user/repos?page=1&per_page=100>; rel="first", <https://api.github.com/user/repos?page=50&per_page=100>; rel="last""#;
        let links = PageLinks::parse(header);

        assert_eq!(links.next, Some(3));
        assert_eq!(links.prev, Some(1));
        assert_eq!(links.first, Some(1));
        assert_eq!(links.last, Some(50));
        assert!(links.next_page_token.is_none());
        assert!(links.has_next());
    }

    #[test]
    fn uses_since_when_page_is_missing() {
        let links = PageLinks::parse(r#"<https://api.github.com/users?since=135>; rel="next""#);
        assert_eq!(links.next, Some(135));
    }

    #[test]
    fn keeps_non_numeric_page_as_token() {
        let links = PageLinks::parse(
            r#"<https://api.github.com/orgs/o/audit-log?page=abc123>; rel="next""#,
        );
        assert_eq!(links.next, None);
        assert_eq!(links.next_page_token.as_deref(), Some("abc123"));
    }

    #[test]
    fn parses_cursor_links() {
        let links = PageLinks::parse(
            r#"<https://api.github.com/resource?cursor=v1_12345678>; rel="next""#,
        );
        assert_eq!(links.cursor.as_deref(), Some("v1_12345678"));
        assert!(links.next.is_none());
    }

    #[test]
    fn parses_before_and_after() {
        let header = r#"<https://api.github.com/r?after=a1&per_page=2>; rel="next", <https://api.github.com/r?before=b1&per_page=2>; rel="prev""#;
        let links = PageLinks::parse(header);
        assert_eq!(links.after.as_deref(), Some("a1"));
        assert_eq!(links.before.as_deref(), Some("b1"));
    }

    #[test]
    fn ignores_malformed_links() {
        let links = PageLinks::parse(r#"https://api.github.com/?page=2; rel="next", <bad>"#);
        assert_eq!(links, PageLinks::default());
        assert!(!links.has_next());
    }

    #[test]
    fn list_options_encode_non_zero_fields() {
        let opts = ListOptions::new(2, 10);
        assert_eq!(
            add_options("/orgs/o/repos", Some(&opts)).unwrap(),
            "/orgs/o/repos?page=2&per_page=10"
        );
        assert_eq!(
            add_options("/users", Some(&ListOptions::default())).unwrap(),
            "/users"
        );
    }

    #[test]
    fn unset_list_options_skip_path_checks() {
        assert_eq!(
            add_options::<ListOptions>("/search/a b", None).unwrap(),
            "/search/a b"
        );
        assert_eq!(
            add_options("/search/a b", Some(&ListOptions::default())).unwrap(),
            "/search/a b"
        );
        assert!(add_options("/search/a b", Some(&ListOptions::new(2, 0))).is_err());
    }

    #[test]
    fn next_options_follow_links() {
        let opts = ListOptions::new(1, 50);
        let links = PageLinks {
            next: Some(2),
            ..PageLinks::default()
        };
        assert_eq!(opts.next(&links), Some(ListOptions::new(2, 50)));
        assert_eq!(opts.next(&PageLinks::default()), None);
    }
}
