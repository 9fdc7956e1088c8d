//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single catch-all handler
//! - Wire up middleware (request id, tracing, timeout, body limit)
//! - Translate each request onto the reserved origin and resolve it
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Instrument;

use crate::config::ResolverConfig;
use crate::http::request::{request_id, to_resolve_request, MakeRequestUuid, TranslateError};
use crate::http::response::resolution_response;
use crate::lifecycle::shutdown;
use crate::observability::tracing::resolution_span;
use crate::resolver::RequestResolver;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: RequestResolver,
    pub max_body_size: usize,
}

/// Preview surface: serves the reserved origin over plain HTTP.
pub struct HttpServer {
    router: Router,
    config: ResolverConfig,
}

impl HttpServer {
    /// Create a new HTTP server answering through `resolver`.
    pub fn new(config: ResolverConfig, resolver: RequestResolver) -> Self {
        let state = AppState {
            resolver,
            max_body_size: config.limits.max_body_size,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ResolverConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(resolve_handler))
            .route("/", any(resolve_handler))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The fully layered router, for embedding in another server.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Resolve any request against the reserved origin.
async fn resolve_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id(&request);
    let span = resolution_span(&request_id, request.method().as_str(), &request.uri().to_string());

    async move {
        let resolve_request =
            match to_resolve_request(state.resolver.origin(), request, state.max_body_size).await {
                Ok(r) => r,
                Err(e @ TranslateError::Body { .. }) => {
                    tracing::warn!(error = %e, "Rejecting request body");
                    return (StatusCode::PAYLOAD_TOO_LARGE, e.to_string()).into_response();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Rejecting request target");
                    return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
                }
            };

        resolution_response(state.resolver.resolve(resolve_request).await)
    }
    .instrument(span)
    .await
}
