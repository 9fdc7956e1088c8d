//! Request resolution: classify, dispatch, look up, assemble.
//!
//! # Responsibilities
//! - Decide whether a request belongs to the reserved origin
//! - Route proxy calls to host logic and honour its answer
//! - Fall back to builtin resources, then packaged assets, then 404
//! - Shape every response with the shared header rules
//!
//! # Design Decisions
//! - Fixed stage order, first success wins
//! - Host logic runs on its own task: a panic there is a failed dispatch,
//!   and dropping a resolution never aborts host logic already running
//! - Lookups only fail on genuine I/O faults; those are the only errors returned

use axum::http::StatusCode;
use std::sync::Arc;
use std::time::Instant;

use crate::body::BodyStream;
use crate::headers::HeaderMapping;
use crate::observability::metrics;
use crate::origin::ReservedOrigin;
use crate::providers::{BuiltinResources, MemoryAssetStore, ResourceProvider};
use crate::proxy::{DispatchError, NoProxy, ProxyDispatcher, ProxyRequest, ProxyResponse};
use crate::resolver::assembly::{finalize, Draft};
use crate::resolver::response::{Resolution, ResolvedResponse, ResponseSource};
use crate::resolver::ResolveError;
use crate::routing::{PathClassifier, PathKind, DEFAULT_PROXY_PREFIX};

/// Default document served for the origin root when none is configured.
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// An inbound request as handed over by a hosting surface.
#[derive(Debug, Default)]
pub struct ResolveRequest {
    /// Full URL, query string included.
    pub url: String,
    /// Method token as the surface received it; `None` means `GET`.
    pub method: Option<String>,
    pub headers: HeaderMapping,
    pub body: Option<BodyStream>,
}

impl ResolveRequest {
    /// A `GET` for `url` with no headers or body.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<BodyStream>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Resolves reserved-origin requests into synthetic responses.
///
/// Cheap to clone; all state is immutable and shared.
#[derive(Clone)]
pub struct RequestResolver {
    origin: ReservedOrigin,
    classifier: PathClassifier,
    default_document: String,
    dispatcher: Arc<dyn ProxyDispatcher>,
    builtins: Arc<dyn ResourceProvider>,
    assets: Arc<dyn ResourceProvider>,
}

impl RequestResolver {
    /// Start building a resolver for `origin`.
    pub fn builder(origin: ReservedOrigin) -> RequestResolverBuilder {
        RequestResolverBuilder::new(origin)
    }

    pub fn origin(&self) -> &ReservedOrigin {
        &self.origin
    }

    pub fn default_document(&self) -> &str {
        &self.default_document
    }

    pub fn classifier(&self) -> &PathClassifier {
        &self.classifier
    }

    /// Resolve one request.
    ///
    /// Returns [`Resolution::Deferred`] for URLs outside the reserved origin
    /// (including URLs that don't parse). Every other outcome is a well-formed
    /// response, except genuine I/O faults while reading a resource.
    pub async fn resolve(&self, request: ResolveRequest) -> Result<Resolution, ResolveError> {
        let started = Instant::now();
        let ResolveRequest {
            url,
            method,
            headers,
            body,
        } = request;

        let Some(relative_path) = self.origin.relative_path(&url) else {
            tracing::debug!(url = %url, "Not a reserved-origin request, deferring");
            metrics::record_deferred();
            return Ok(Resolution::Deferred);
        };

        let classification = self.classifier.classify(&relative_path);
        let effective_path = match classification.kind {
            PathKind::Default => self.default_document.as_str(),
            PathKind::Proxy | PathKind::Asset => relative_path.as_str(),
        };

        if classification.kind == PathKind::Proxy {
            let proxy_request = ProxyRequest::new(url.as_str(), method.as_deref(), Some(headers), body);
            if let Some(response) = self.dispatch(proxy_request).await {
                return Ok(Resolution::Response(self.finish(proxy_draft(response), started)));
            }
        }

        let draft = match self.builtins.open(effective_path).await {
            Ok(Some(resource)) => Draft::ok(
                resource.content_type.unwrap_or_else(|| classification.content_type.to_string()),
                resource.body,
                ResponseSource::Builtin,
            ),
            Ok(None) => match self.assets.open(effective_path).await {
                Ok(Some(resource)) => Draft::ok(
                    resource.content_type.unwrap_or_else(|| classification.content_type.to_string()),
                    resource.body,
                    ResponseSource::Asset,
                ),
                Ok(None) => {
                    tracing::debug!(path = %effective_path, "No resource found");
                    Draft::not_found()
                }
                Err(source) => return Err(self.lookup_failed(ResponseSource::Asset, source)),
            },
            Err(source) => return Err(self.lookup_failed(ResponseSource::Builtin, source)),
        };

        Ok(Resolution::Response(self.finish(draft, started)))
    }

    /// Run host logic on its own task and keep its answer only if it handled the call.
    async fn dispatch(&self, request: ProxyRequest) -> Option<ProxyResponse> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let url = request.url().to_string();
        let method = request.method();

        tracing::debug!(url = %url, method = %method, "Dispatching proxy request");

        let outcome = tokio::spawn(async move { dispatcher.dispatch(request).await }).await;
        match outcome {
            Ok(Ok(Some(response))) if response.is_handled() => Some(response),
            Ok(Ok(_)) => {
                tracing::debug!(url = %url, "Proxy handler left no response, falling through");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(url = %url, error = %e, "Proxy dispatch failed, falling through");
                metrics::record_dispatch_failure("error");
                None
            }
            Err(join_error) if join_error.is_panic() => {
                tracing::error!(url = %url, error = %DispatchError::Panicked, "Proxy dispatch panicked, falling through");
                metrics::record_dispatch_failure("panic");
                None
            }
            Err(join_error) => {
                tracing::warn!(url = %url, error = %join_error, "Proxy dispatch was cancelled, falling through");
                metrics::record_dispatch_failure("cancelled");
                None
            }
        }
    }

    fn lookup_failed(&self, stage: ResponseSource, source: crate::providers::ProviderError) -> ResolveError {
        tracing::error!(stage = %stage, error = %source, "Resource lookup failed");
        metrics::record_lookup_failure(stage.as_str());
        ResolveError::Lookup { stage, source }
    }

    fn finish(&self, draft: Draft, started: Instant) -> ResolvedResponse {
        let response = finalize(draft);
        tracing::debug!(
            source = %response.source,
            status = response.status.as_u16(),
            content_type = %response.content_type,
            "Request resolved"
        );
        metrics::record_resolution(response.source.as_str(), response.status.as_u16(), started);
        response
    }
}

impl std::fmt::Debug for RequestResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestResolver")
            .field("origin", &self.origin.as_str())
            .field("proxy_prefix", &self.classifier.proxy_prefix())
            .field("default_document", &self.default_document)
            .finish_non_exhaustive()
    }
}

fn proxy_draft(response: ProxyResponse) -> Draft {
    let content_type = response.effective_content_type().to_string();
    Draft {
        status: response.status.unwrap_or(StatusCode::OK),
        content_type,
        headers: response.headers,
        body: response.body,
        source: ResponseSource::Proxy,
    }
}

/// Builder for [`RequestResolver`].
///
/// Defaults: `index.html`, prefix `proxy`, no host logic, the standard builtin
/// resources and an empty asset bundle. The standard builtins are set up for
/// the configured origin and prefix when the resolver is built.
pub struct RequestResolverBuilder {
    origin: ReservedOrigin,
    default_document: String,
    proxy_prefix: String,
    dispatcher: Arc<dyn ProxyDispatcher>,
    builtins: Option<Arc<dyn ResourceProvider>>,
    assets: Arc<dyn ResourceProvider>,
}

impl RequestResolverBuilder {
    fn new(origin: ReservedOrigin) -> Self {
        Self {
            origin,
            default_document: DEFAULT_DOCUMENT.to_string(),
            proxy_prefix: DEFAULT_PROXY_PREFIX.to_string(),
            dispatcher: Arc::new(NoProxy),
            builtins: None,
            assets: Arc::new(MemoryAssetStore::new()),
        }
    }

    pub fn default_document(mut self, name: impl Into<String>) -> Self {
        self.default_document = name.into();
        self
    }

    pub fn proxy_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.proxy_prefix = prefix.into();
        self
    }

    pub fn dispatcher(self, dispatcher: impl ProxyDispatcher) -> Self {
        self.shared_dispatcher(Arc::new(dispatcher))
    }

    pub fn shared_dispatcher(mut self, dispatcher: Arc<dyn ProxyDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn builtins(mut self, builtins: impl ResourceProvider + 'static) -> Self {
        self.builtins = Some(Arc::new(builtins));
        self
    }

    pub fn assets(mut self, assets: impl ResourceProvider + 'static) -> Self {
        self.assets = Arc::new(assets);
        self
    }

    pub fn build(self) -> RequestResolver {
        let classifier = PathClassifier::new(self.proxy_prefix);
        let builtins = match self.builtins {
            Some(builtins) => builtins,
            None => Arc::new(BuiltinResources::with_defaults(
                &self.origin,
                classifier.proxy_prefix(),
            )),
        };

        RequestResolver {
            origin: self.origin,
            classifier,
            default_document: self.default_document,
            dispatcher: self.dispatcher,
            builtins,
            assets: self.assets,
        }
    }
}
