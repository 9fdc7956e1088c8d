//! Response-shaping rules shared by every hosting surface.
//!
//! # Responsibilities
//! - Redirect short-circuit (3xx + Location → status and Location only)
//! - Content-Type / Content-Length when absent
//! - Permissive CORS so the UI can call proxy endpoints freely
//! - Cache suppression for app-shell resources
//!
//! # Design Decisions
//! - Existing Content-Type/Content-Length from host logic are never clobbered
//! - CORS and cache headers are always replaced, whatever their case, so at
//!   most one value of each reaches the renderer

use axum::http::StatusCode;

use crate::body::BodyStream;
use crate::headers::{
    contains_ci, get_ci, remove_ci, HeaderMapping, ACCEPT_RANGES, ACCESS_CONTROL_ALLOW_CREDENTIALS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
    CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, LOCATION,
};
use crate::resolver::response::{reason_phrase, ResolvedResponse, ResponseSource};

pub const NOT_FOUND_BODY: &str = "Resource not found (404)";
pub const INTERNAL_ERROR_BODY: &str = "Internal error (500)";
pub const NO_STORE: &str = "no-cache, max-age=0, must-revalidate, no-store";
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// A response before header assembly.
#[derive(Debug)]
pub struct Draft {
    pub status: StatusCode,
    pub content_type: String,
    pub headers: HeaderMapping,
    pub body: Option<BodyStream>,
    pub source: ResponseSource,
}

impl Draft {
    pub fn ok(content_type: impl Into<String>, body: BodyStream, source: ResponseSource) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: content_type.into(),
            headers: HeaderMapping::new(),
            body: Some(body),
            source,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            content_type: crate::routing::mime::TEXT_PLAIN.to_string(),
            headers: HeaderMapping::new(),
            body: Some(BodyStream::from(NOT_FOUND_BODY)),
            source: ResponseSource::NotFound,
        }
    }

    pub fn internal_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            content_type: crate::routing::mime::TEXT_PLAIN.to_string(),
            headers: HeaderMapping::new(),
            body: Some(BodyStream::from(INTERNAL_ERROR_BODY)),
            source: ResponseSource::Error,
        }
    }
}

/// Apply the redirect short-circuit and header assembly.
pub fn finalize(draft: Draft) -> ResolvedResponse {
    let Draft {
        status,
        content_type,
        headers,
        body,
        source,
    } = draft;

    if status.is_redirection() {
        if let Some(location) = get_ci(&headers, LOCATION) {
            let mut redirect = HeaderMapping::new();
            redirect.insert(LOCATION.to_string(), location.to_string());
            // Redirects carry no body; release whatever host logic supplied.
            drop(body);
            return ResolvedResponse {
                status,
                reason: reason_phrase(status),
                content_type,
                headers: redirect,
                body: None,
                source,
            };
        }
    }

    let headers = assemble_headers(headers, &content_type, body.as_ref().and_then(BodyStream::len));
    let content_type = get_ci(&headers, CONTENT_TYPE)
        .map(str::to_string)
        .unwrap_or(content_type);

    ResolvedResponse {
        status,
        reason: reason_phrase(status),
        content_type,
        headers,
        body,
        source,
    }
}

/// Merge the mandatory headers into `headers`.
pub fn assemble_headers(
    mut headers: HeaderMapping,
    content_type: &str,
    content_length: Option<u64>,
) -> HeaderMapping {
    remove_ci(&mut headers, CACHE_CONTROL);
    headers.insert(CACHE_CONTROL.to_string(), NO_STORE.to_string());

    if !contains_ci(&headers, CONTENT_LENGTH) {
        if let Some(len) = content_length {
            headers.insert(CONTENT_LENGTH.to_string(), len.to_string());
        }
    }

    if !contains_ci(&headers, CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE.to_string(), content_type.to_string());
    }

    for name in [
        ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        ACCESS_CONTROL_ALLOW_METHODS,
        ACCESS_CONTROL_EXPOSE_HEADERS,
        ACCEPT_RANGES,
    ] {
        remove_ci(&mut headers, name);
    }

    let exposed = headers.keys().map(String::as_str).collect::<Vec<_>>().join(",");
    headers.insert(ACCESS_CONTROL_EXPOSE_HEADERS.to_string(), exposed);
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN.to_string(), "*".to_string());
    headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS.to_string(), "true".to_string());
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS.to_string(), ALLOWED_METHODS.to_string());
    headers.insert(ACCEPT_RANGES.to_string(), "bytes".to_string());

    headers
}
