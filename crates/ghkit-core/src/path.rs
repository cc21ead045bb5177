//! Escaping of path parameters.

use crate::error::{Error, Result};
use url::Url;

/// Percent-encode a single path segment (owner, repository, label name, ...).
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] for empty values, dot segments and
/// values containing control characters.
pub fn segment(value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(Error::InvalidRequest(
            "path parameter must not be empty".to_string(),
        ));
    }
    if value == "." || value == ".." {
        return Err(Error::InvalidRequest(format!(
            "path parameter `{value}` is a dot segment"
        )));
    }
    if value.chars().any(char::is_control) {
        return Err(Error::InvalidRequest(format!(
            "path parameter `{}` contains control characters",
            value.escape_debug()
        )));
    }

    let mut url = Url::parse("http://localhost/")?;
    url.path_segments_mut()
        .map_err(|()| Error::InvalidRequest("cannot build path".to_string()))?
        .clear()
        .push(value);

    Ok(url.path().trim_start_matches('/').to_string())
}
