use std::borrow::Cow;

use axum::http::{HeaderMap, HeaderName, header};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Optional header carrying the refresh token. Consulted only when the access token fails.
pub const REFRESH_TOKEN_HEADER: HeaderName = HeaderName::from_static("refresh-token");

/// Credentials carried by one request. Built per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Credential {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            access_token: access_token(headers).map(Cow::into_owned),
            refresh_token: refresh_token(headers).map(Cow::into_owned),
        }
    }
}

/// `Authorization: Bearer <token>` → `<token>`, verbatim.
///
/// The prefix is matched on raw bytes: a prefixed value carrying opaque
/// (non-ASCII) bytes is still a bearer token, decoded lossily. A missing header
/// or any other scheme (including lowercase `bearer`) yields `None`.
pub(crate) fn access_token(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.as_bytes().strip_prefix(BEARER_PREFIX.as_bytes()))
        .map(String::from_utf8_lossy)
}

pub(crate) fn refresh_token(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    headers
        .get(&REFRESH_TOKEN_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
}
