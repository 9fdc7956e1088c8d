//! Outbound response handling.
//!
//! # Responsibilities
//! - Turn a [`ResolvedResponse`] into an axum response, streaming the body
//! - Map deferrals and resolution failures to HTTP statuses
//!
//! # Design Decisions
//! - Header fields that are not valid HTTP are dropped with a warning rather
//!   than failing the whole response
//! - Deferred requests get 421: there is no "normal loading" behind this surface

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use crate::resolver::{ResolveError, ResolvedResponse, Resolution};

/// Convert a resolved response into an HTTP response.
pub fn into_http_response(resolved: ResolvedResponse) -> Response {
    let ResolvedResponse {
        status,
        headers,
        body,
        ..
    } = resolved;

    let body = match body {
        Some(stream) => Body::from_stream(ReaderStream::new(stream.into_reader())),
        None => Body::empty(),
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;

    let target = response.headers_mut();
    for (name, value) in &headers {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                target.append(name, value);
            }
            _ => tracing::warn!(header = %name, "Dropping header that is not valid HTTP"),
        }
    }

    response
}

/// Convert the outcome of a resolution into an HTTP response.
pub fn resolution_response(outcome: Result<Resolution, ResolveError>) -> Response {
    match outcome {
        Ok(Resolution::Response(resolved)) => into_http_response(resolved),
        Ok(Resolution::Deferred) => {
            tracing::warn!("Request is outside the reserved origin");
            (StatusCode::MISDIRECTED_REQUEST, "Request is outside the reserved origin").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Resolution failed");
            into_http_response(e.into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::HeaderMapping;
    use crate::resolver::{finalize, Draft, ResponseSource};

    #[tokio::test]
    async fn test_body_and_headers_carried() {
        let resolved = finalize(Draft::ok("text/css", "a{}".into(), ResponseSource::Asset));
        let response = into_http_response(resolved);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/css");
        assert_eq!(response.headers()["content-length"], "3");
        assert_eq!(response.headers()["access-control-allow-origin"], "*");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"a{}");
    }

    #[test]
    fn test_invalid_header_dropped() {
        let mut headers = HeaderMapping::new();
        headers.insert("bad header".into(), "x".into());
        headers.insert("X-Ok".into(), "1".into());
        let resolved = ResolvedResponse {
            status: StatusCode::OK,
            reason: "OK",
            content_type: "text/plain".into(),
            headers,
            body: None,
            source: ResponseSource::Proxy,
        };

        let response = into_http_response(resolved);
        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers()["x-ok"], "1");
    }

    #[test]
    fn test_deferred_is_misdirected() {
        let response = resolution_response(Ok(Resolution::Deferred));
        assert_eq!(response.status(), StatusCode::MISDIRECTED_REQUEST);
    }
}
