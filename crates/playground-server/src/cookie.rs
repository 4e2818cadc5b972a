//! Shared-secret cookie gate on the save endpoint.
//!
//! When configured, a save is accepted only if the request carries a cookie
//! whose name and value match the configured pair exactly. This is an access
//! gate, not authentication: there is no session or per-user identity.

use std::borrow::Cow;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// A required cookie name/value pair.
#[derive(Clone, PartialEq, Eq)]
pub struct CookieGate {
    name: String,
    value: String,
}

impl std::fmt::Debug for CookieGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieGate")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl CookieGate {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        CookieGate {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Builds a gate only when both halves are present and non-empty.
    pub fn from_pair(name: Option<String>, value: Option<String>) -> Option<Self> {
        match (name, value) {
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => {
                Some(CookieGate::new(name, value))
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `headers` carry the required cookie with the exact value.
    pub fn admits(&self, headers: &HeaderMap) -> bool {
        cookie_value(headers, &self.name).as_deref() == Some(self.value.as_str())
    }
}

/// First value of cookie `name` across all `Cookie` headers, decoded.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| decode_value(v.trim()))
}

/// Strips one pair of surrounding double quotes and percent-decodes.
///
/// A value that does not decode to UTF-8 is kept as sent.
fn decode_value(raw: &str) -> Cow<'_, str> {
    let unquoted = raw
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(raw);
    if !unquoted.contains('%') {
        return Cow::Borrowed(unquoted);
    }
    urlencoding::decode(unquoted).unwrap_or(Cow::Borrowed(unquoted))
}
