//! Helpers for populating optional request fields.
//!
//! Request and response structs mark every field GitHub may omit as
//! `Option<T>`, so "not set" and "set to the zero value" stay distinct:
//!
//! ```
//! use ghkit_core::optional;
//!
//! let private: Option<bool> = optional::ptr(false);
//! let name = optional::string("octocat");
//! assert_eq!(private, Some(false));
//! assert_eq!(name.as_deref(), Some("octocat"));
//! ```

/// Mark a value as explicitly set.
#[must_use]
pub const fn ptr<T>(value: T) -> Option<T> {
    Some(value)
}

/// Mark a string value as explicitly set.
#[must_use]
pub fn string(value: impl Into<String>) -> Option<String> {
    Some(value.into())
}

/// Mark a list of strings as explicitly set.
#[must_use]
pub fn strings<I, S>(values: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Some(values.into_iter().map(Into::into).collect())
}
