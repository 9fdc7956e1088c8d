//! Origin Resolver Library
//!
//! Answers requests for a reserved origin with synthetic responses: host
//! logic for proxy paths, builtin runtime resources, packaged assets, 404.

// Resolution core
pub mod body;
pub mod headers;
pub mod origin;
pub mod providers;
pub mod proxy;
pub mod resolver;
pub mod routing;

// Hosting surfaces
pub mod adapter;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use adapter::CallbackAdapter;
pub use body::BodyStream;
pub use config::ResolverConfig;
pub use headers::HeaderMapping;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use origin::ReservedOrigin;
pub use proxy::{dispatch_fn, ProxyDispatcher, ProxyRequest, ProxyResponse};
pub use resolver::{RequestResolver, ResolveError, ResolveRequest, Resolution, ResolvedResponse};
