//! Query string encoding for option structs.
//!
//! Option structs describe their query parameters by implementing [`ToQuery`]
//! against the [`QueryParams`] builder, and [`add_options`] merges the result
//! onto a request path. Only [`QueryValue`] implementors can be pushed, so a
//! field type the encoder cannot format is a compile error rather than a
//! runtime surprise.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use url::form_urlencoded;

/// A scalar that can be written as a query parameter value.
pub trait QueryValue {
    /// Format the value for the query string (before percent-encoding).
    fn query_value(&self) -> String;

    /// True for the type's zero value, which `omitempty` style fields skip.
    fn is_zero(&self) -> bool;
}

macro_rules! int_query_value {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn query_value(&self) -> String {
                    self.to_string()
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

int_query_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl QueryValue for bool {
    fn query_value(&self) -> String {
        self.to_string()
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl QueryValue for str {
    fn query_value(&self) -> String {
        self.to_string()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl QueryValue for String {
    fn query_value(&self) -> String {
        self.clone()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl QueryValue for DateTime<Utc> {
    fn query_value(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn is_zero(&self) -> bool {
        self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn query_value(&self) -> String {
        (**self).query_value()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

/// Declarative mapping from an option struct to query parameters.
pub trait ToQuery {
    /// Push this struct's parameters, in field declaration order.
    fn append_query(&self, params: &mut QueryParams);
}

impl<T: ToQuery + ?Sized> ToQuery for &T {
    fn append_query(&self, params: &mut QueryParams) {
        (**self).append_query(params);
    }
}

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Collect the parameters of an option struct.
    #[must_use]
    pub fn from_options<O: ToQuery + ?Sized>(options: &O) -> Self {
        let mut params = Self::new();
        options.append_query(&mut params);
        params
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: QueryValue,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.query_value()));
        }
    }

    /// Append using a mapping function when the value is present.
    pub fn push_opt_with<T, F>(&mut self, key: &'static str, value: Option<T>, mut map: F)
    where
        F: FnMut(T) -> String,
    {
        if let Some(value) = value {
            self.pairs.push((key, map(value)));
        }
    }

    /// Append a value unless it is the zero value of its type.
    pub fn push_nonzero<T>(&mut self, key: &'static str, value: T)
    where
        T: QueryValue,
    {
        if !value.is_zero() {
            self.pairs.push((key, value.query_value()));
        }
    }

    /// Append every element as a repeated parameter (`key=a&key=b`).
    pub fn push_each<T>(&mut self, key: &'static str, values: &[T])
    where
        T: QueryValue,
    {
        for value in values {
            self.pairs.push((key, value.query_value()));
        }
    }

    /// Append all elements as one comma-joined parameter, skipped when empty.
    pub fn push_joined<T>(&mut self, key: &'static str, values: &[T])
    where
        T: QueryValue,
    {
        if values.is_empty() {
            return;
        }
        let joined = values
            .iter()
            .map(|value| value.query_value())
            .collect::<Vec<_>>()
            .join(",");
        self.pairs.push((key, joined));
    }

    /// Flatten an embedded option struct into this builder.
    pub fn extend_from<O: ToQuery + ?Sized>(&mut self, options: &O) {
        options.append_query(self);
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of collected pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

/// Append the encoded options to `path`.
///
/// Parameters already present on `path` are kept unless the options set the
/// same key. Keys are emitted in sorted order; repeated keys keep their
/// relative order. The path is returned unchanged when `options` is `None` or
/// encodes to nothing.
///
/// # Errors
///
/// Returns [`Error::Encoding`] when a query must be appended and `path`
/// cannot carry one.
pub fn add_options<O>(path: &str, options: Option<&O>) -> Result<String>
where
    O: ToQuery + ?Sized,
{
    let Some(options) = options else {
        return Ok(path.to_string());
    };
    let params = QueryParams::from_options(options);
    if params.is_empty() {
        return Ok(path.to_string());
    }
    validate_path(path)?;

    let (base, existing) = match path.split_once('?') {
        Some((base, query)) => (base, query),
        None => (path, ""),
    };

    let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
        merged
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    let mut overridden: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    for (key, value) in params.into_pairs() {
        overridden.entry(key).or_default().push(value);
    }
    for (key, values) in overridden {
        merged.insert(key.to_string(), values);
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in &merged {
        for value in values {
            serializer.append_pair(key, value);
        }
    }

    Ok(format!("{base}?{}", serializer.finish()))
}

fn validate_path(path: &str) -> Result<()> {
    if let Some(ch) = path.chars().find(|ch| ch.is_whitespace() || ch.is_control()) {
        return Err(Error::Encoding(format!(
            "path `{}` contains invalid character {ch:?}",
            path.escape_debug()
        )));
    }
    if path.contains('#') {
        return Err(Error::Encoding(format!(
            "path `{path}` must not contain a fragment"
        )));
    }

    let bytes = path.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let valid = bytes
                .get(index + 1..index + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(Error::Encoding(format!(
                    "path `{path}` contains a malformed percent-escape"
                )));
            }
            index += 3;
        } else {
            index += 1;
        }
    }

    Ok(())
}
