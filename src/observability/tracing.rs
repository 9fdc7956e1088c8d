//! Request spans.
//!
//! Hosting surfaces wrap each resolution in a span carrying the request id so
//! every log line emitted while resolving, host logic included, can be
//! correlated.

use tracing::Span;

/// Span for one resolution.
pub fn resolution_span(request_id: &str, method: &str, url: &str) -> Span {
    tracing::info_span!("resolve", request_id = %request_id, method = %method, url = %url)
}
