//! The seam between the resolver and host-application logic.

use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;
use thiserror::Error;

use crate::proxy::request::ProxyRequest;
use crate::proxy::response::ProxyResponse;

/// Failures raised by host logic while answering a proxy call.
///
/// The resolver never surfaces these to the renderer; a failed dispatch falls
/// through to builtin and asset lookup.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Host logic reported a failure.
    #[error("proxy handler failed: {0}")]
    Handler(String),

    /// Host logic panicked.
    #[error("proxy handler panicked")]
    Panicked,

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for dispatch operations.
pub type DispatchResult = Result<Option<ProxyResponse>, DispatchError>;

/// Host-application logic answering proxy calls.
///
/// Implementations may do arbitrary work, including their own I/O. Returning
/// `Ok(None)` (or a response that is not [handled](ProxyResponse::is_handled))
/// means "not mine": resolution continues with builtin and asset lookup.
#[async_trait]
pub trait ProxyDispatcher: Send + Sync + 'static {
    async fn dispatch(&self, request: ProxyRequest) -> DispatchResult;
}

/// Dispatcher that never answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProxy;

#[async_trait]
impl ProxyDispatcher for NoProxy {
    async fn dispatch(&self, _request: ProxyRequest) -> DispatchResult {
        Ok(None)
    }
}

/// Dispatcher backed by an async closure.
pub struct FnDispatcher<F, Fut> {
    f: F,
    _fut: PhantomData<fn() -> Fut>,
}

/// Wrap an async closure as a [`ProxyDispatcher`].
///
/// ```ignore
/// let dispatcher = dispatch_fn(|req: ProxyRequest| async move {
///     Ok(Some(ProxyResponse::new().with_body(req.url().to_string())))
/// });
/// ```
pub fn dispatch_fn<F, Fut>(f: F) -> FnDispatcher<F, Fut>
where
    F: Fn(ProxyRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = DispatchResult> + Send + 'static,
{
    FnDispatcher {
        f,
        _fut: PhantomData,
    }
}

#[async_trait]
impl<F, Fut> ProxyDispatcher for FnDispatcher<F, Fut>
where
    F: Fn(ProxyRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = DispatchResult> + Send + 'static,
{
    async fn dispatch(&self, request: ProxyRequest) -> DispatchResult {
        (self.f)(request).await
    }
}
