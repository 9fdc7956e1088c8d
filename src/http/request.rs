//! Inbound request handling.
//!
//! # Responsibilities
//! - Generate a request id (UUID v4) for requests that arrive without one
//! - Map the request target onto the reserved origin
//! - Buffer the body (bounded) and hand everything to the resolver
//!
//! # Design Decisions
//! - The listener's own scheme and authority are irrelevant: every request
//!   is treated as addressed to the reserved origin
//! - Repeated header fields are folded into one comma-separated value

use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request};
use thiserror::Error;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::headers::HeaderMapping;
use crate::origin::ReservedOrigin;
use crate::resolver::ResolveRequest;

/// Request id header, set on the request and echoed on the response.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues a fresh UUID v4 per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Request id assigned to `request`, or `"unknown"`.
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Failures turning an HTTP request into a [`ResolveRequest`].
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("request target cannot be mapped onto the origin: {0}")]
    InvalidTarget(#[from] url::ParseError),

    #[error("request body exceeds {limit} bytes or could not be read")]
    Body { limit: usize },
}

/// Translate an HTTP request into a resolver request on `origin`.
pub async fn to_resolve_request(
    origin: &ReservedOrigin,
    request: Request<Body>,
    max_body_size: usize,
) -> Result<ResolveRequest, TranslateError> {
    let (parts, body) = request.into_parts();

    let target = parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let url = origin.join(target)?;

    let bytes = axum::body::to_bytes(body, max_body_size)
        .await
        .map_err(|_| TranslateError::Body { limit: max_body_size })?;

    let mut resolve_request = ResolveRequest {
        url: url.into(),
        method: Some(parts.method.as_str().to_string()),
        headers: to_header_mapping(&parts.headers),
        body: None,
    };
    if !bytes.is_empty() {
        resolve_request.body = Some(bytes.into());
    }
    Ok(resolve_request)
}

/// Copy readable header fields into a [`HeaderMapping`].
pub fn to_header_mapping(headers: &HeaderMap) -> HeaderMapping {
    let mut mapping = HeaderMapping::with_capacity(headers.keys_len());
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            tracing::debug!(header = %name, "Skipping non-text header value");
            continue;
        };
        mapping
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    mapping
}
