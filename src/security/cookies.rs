//! Request cookie parsing and re-serialization.
//!
//! The browser's cookies belong to the proxy's origin; they reach the backend
//! only because the proxy folds them back into one `Cookie` header.

use std::borrow::Cow;

use axum::http::{header::COOKIE, HeaderMap};

/// A single `name=value` request cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Collect cookies from every `Cookie` header in enumeration order.
///
/// A repeated name keeps the position of its first occurrence and the value
/// of its last. Fragments without a name are skipped. Header bytes are
/// decoded as UTF-8, so non-ASCII values survive; invalid sequences become
/// U+FFFD.
pub fn parse_cookies(headers: &HeaderMap) -> Vec<Cookie> {
    let mut cookies: Vec<Cookie> = Vec::new();

    let decoded: Vec<Cow<'_, str>> = headers
        .get_all(COOKIE)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .collect();

    for fragment in decoded.iter().flat_map(|value| value.split(';')) {
        let fragment = fragment.trim();
        let (name, value) = match fragment.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim()),
            None => (fragment, ""),
        };
        if name.is_empty() {
            continue;
        }

        match cookies.iter().position(|c| c.name == name) {
            Some(index) => cookies[index].value = value.to_string(),
            None => cookies.push(Cookie::new(name, value)),
        }
    }

    cookies
}

/// Serialize as `name1=value1; name2=value2`, or `None` when empty.
pub fn serialize_cookies(cookies: &[Cookie]) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    let pairs: Vec<String> = cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect();
    Some(pairs.join("; "))
}
