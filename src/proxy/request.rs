//! Inbound proxy calls.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::body::BodyStream;
use crate::headers::HeaderMapping;
use crate::origin::query::{parse_query, QueryParams};

/// Methods a proxy call can carry.
///
/// Closed set; any other token (including `PATCH` and `HEAD`) is treated as `GET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Options,
}

impl HttpMethod {
    /// Parse a method token case-insensitively, defaulting to `GET`.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "OPTIONS" => Self::Options,
            _ => Self::Get,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a request routed to host-application logic.
#[derive(Debug)]
pub struct ProxyRequest {
    url: String,
    method: HttpMethod,
    headers: HeaderMapping,
    body: Option<BodyStream>,
    query: QueryParams,
}

impl ProxyRequest {
    /// Build a proxy request from the full original URL (query string included).
    ///
    /// A missing method means `GET`; missing headers mean an empty mapping.
    pub fn new(
        url: impl Into<String>,
        method: Option<&str>,
        headers: Option<HeaderMapping>,
        body: Option<BodyStream>,
    ) -> Self {
        let url = url.into();
        let query = parse_query(&url);
        Self {
            url,
            method: method.map(HttpMethod::from_token).unwrap_or_default(),
            headers: headers.unwrap_or_default(),
            body,
            query,
        }
    }

    /// Full original URL, including the query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &HeaderMapping {
        &self.headers
    }

    /// Query parameters parsed from the URL, still percent-encoded.
    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    pub fn body(&self) -> Option<&BodyStream> {
        self.body.as_ref()
    }

    /// Take ownership of the request body. Later calls return `None`.
    pub fn take_body(&mut self) -> Option<BodyStream> {
        self.body.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tokens() {
        assert_eq!(HttpMethod::from_token("post"), HttpMethod::Post);
        assert_eq!(HttpMethod::from_token("PUT"), HttpMethod::Put);
        assert_eq!(HttpMethod::from_token("Delete"), HttpMethod::Delete);
        assert_eq!(HttpMethod::from_token("OPTIONS"), HttpMethod::Options);
        assert_eq!(HttpMethod::from_token("GET"), HttpMethod::Get);
    }

    #[test]
    fn test_unknown_methods_default_to_get() {
        for token in ["PATCH", "HEAD", "TRACE", "", "not a method"] {
            assert_eq!(HttpMethod::from_token(token), HttpMethod::Get, "token: {token}");
        }
    }

    #[test]
    fn test_request_defaults() {
        let request = ProxyRequest::new("https://0.0.0.0/proxy/items?x=1&y=2", None, None, None);
        assert_eq!(request.url(), "https://0.0.0.0/proxy/items?x=1&y=2");
        assert_eq!(request.method(), HttpMethod::Get);
        assert!(request.headers().is_empty());
        assert!(request.body().is_none());
        assert_eq!(request.query_params().get("x").map(String::as_str), Some("1"));
        assert_eq!(request.query_params().get("y").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_take_body_once() {
        let mut request = ProxyRequest::new(
            "https://0.0.0.0/proxy",
            Some("POST"),
            None,
            Some(BodyStream::from("{}")),
        );
        assert_eq!(request.method(), HttpMethod::Post);
        assert!(request.take_body().is_some());
        assert!(request.take_body().is_none());
    }

    #[test]
    fn test_method_serializes_uppercase() {
        let json = serde_json::to_string(&HttpMethod::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
    }
}
