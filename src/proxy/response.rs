//! Responses produced by host logic.

use axum::http::StatusCode;
use serde::Serialize;

use crate::body::BodyStream;
use crate::headers::{HeaderMapping, LOCATION};
use crate::routing::mime::{APPLICATION_JSON, TEXT_PLAIN};

/// What host logic answers to a [`ProxyRequest`](crate::proxy::ProxyRequest).
///
/// Every field is optional. A response is only used if it is
/// [handled](ProxyResponse::is_handled); otherwise resolution falls through to
/// builtin and asset lookup.
#[derive(Debug, Default)]
pub struct ProxyResponse {
    pub headers: HeaderMapping,
    /// Defaults to `text/plain` when unset.
    pub content_type: Option<String>,
    pub body: Option<BodyStream>,
    pub status: Option<StatusCode>,
}

impl ProxyResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A response carrying `body` with the given content type.
    pub fn with_body(mut self, body: impl Into<BodyStream>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Serialize `value` as an `application/json` body.
    pub fn json<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        let bytes = serde_json::to_vec(value)?;
        Ok(Self::new().with_body(bytes).with_content_type(APPLICATION_JSON))
    }

    /// A redirect to `location`.
    pub fn redirect(status: StatusCode, location: impl Into<String>) -> Self {
        Self::new().with_status(status).with_header(LOCATION, location)
    }

    /// True if host logic actually answered: it set a body or an explicit status.
    pub fn is_handled(&self) -> bool {
        self.body.is_some() || self.status.is_some()
    }

    /// Content type to serve, `text/plain` if host logic left it unset.
    pub fn effective_content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(TEXT_PLAIN)
    }
}
