//! The resolver's output.

use axum::http::StatusCode;
use bytes::Bytes;
use std::fmt;

use crate::body::BodyStream;
use crate::headers::{get_ci, HeaderMapping};

/// Which stage produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseSource {
    Proxy,
    Builtin,
    Asset,
    NotFound,
    /// Synthesised by an adapter after a [`ResolveError`](crate::resolver::ResolveError).
    Error,
}

impl ResponseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proxy => "proxy",
            Self::Builtin => "builtin",
            Self::Asset => "asset",
            Self::NotFound => "not_found",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled synthetic response.
///
/// The body has a single owner: whoever delivers the response must read it or
/// drop it.
#[derive(Debug)]
pub struct ResolvedResponse {
    pub status: StatusCode,
    pub reason: &'static str,
    pub content_type: String,
    pub headers: HeaderMapping,
    pub body: Option<BodyStream>,
    pub source: ResponseSource,
}

impl ResolvedResponse {
    /// Header value by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        get_ci(&self.headers, name)
    }

    /// True for a 3xx response that carries a `Location`.
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection() && self.header(crate::headers::LOCATION).is_some()
    }

    /// Read the whole body; an absent body reads as empty.
    pub async fn into_bytes(self) -> std::io::Result<Bytes> {
        match self.body {
            Some(body) => body.into_bytes().await,
            None => Ok(Bytes::new()),
        }
    }
}

/// Reason phrase for `status`.
pub fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}

/// Outcome of resolving one request.
#[derive(Debug)]
pub enum Resolution {
    /// Not a reserved-origin request; the hosting surface should load it normally.
    Deferred,
    Response(ResolvedResponse),
}

impl Resolution {
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred)
    }

    pub fn into_response(self) -> Option<ResolvedResponse> {
        match self {
            Self::Deferred => None,
            Self::Response(r) => Some(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_phrases() {
        assert_eq!(reason_phrase(StatusCode::OK), "OK");
        assert_eq!(reason_phrase(StatusCode::NOT_FOUND), "Not Found");
        assert_eq!(reason_phrase(StatusCode::from_u16(599).unwrap()), "Unknown");
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(ResponseSource::NotFound.to_string(), "not_found");
        assert_eq!(ResponseSource::Builtin.as_str(), "builtin");
    }
}
