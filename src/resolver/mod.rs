//! Request resolution subsystem.
//!
//! # Data Flow
//! ```text
//! ResolveRequest (url, method, headers, body)
//!     → ReservedOrigin::relative_path (else Deferred)
//!     → PathClassifier::classify
//!     → proxy dispatch (proxy paths only, authoritative if handled)
//!     → builtin resources
//!     → packaged assets
//!     → 404
//!     → assembly.rs (redirect short-circuit, CORS, cache, content headers)
//!     → Resolution::Response(ResolvedResponse)
//! ```

pub mod assembly;
pub mod pipeline;
pub mod response;

pub use assembly::{assemble_headers, finalize, Draft};
pub use pipeline::{RequestResolver, RequestResolverBuilder, ResolveRequest, DEFAULT_DOCUMENT};
pub use response::{reason_phrase, Resolution, ResolvedResponse, ResponseSource};

use thiserror::Error;

use crate::providers::ProviderError;

/// Resolution failures a hosting surface has to handle.
///
/// Everything else (foreign URLs, missing resources, failed host logic) is
/// expressed as a [`Resolution`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{stage} lookup failed: {source}")]
    Lookup {
        stage: ResponseSource,
        #[source]
        source: ProviderError,
    },
}

impl ResolveError {
    /// The response a surface should deliver in place of a failed resolution.
    pub fn into_response(self) -> ResolvedResponse {
        finalize(Draft::internal_error())
    }
}
