//! Host-logic dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! proxy-classified request (url, method, headers, body)
//!     → request.rs (ProxyRequest: method normalised, query parsed)
//!     → dispatcher.rs (ProxyDispatcher::dispatch, awaited on its own task)
//!     → response.rs (ProxyResponse: status, headers, content type, body)
//!     → authoritative if handled, else fall through
//! ```
//!
//! # Design Decisions
//! - Request goes in by value, response comes back out; no shared mutable args
//! - A response is "handled" if it has a body or an explicit status
//! - Dispatch failures are recovered, never shown to the renderer
//! - No timeout here; the hosting surface bounds the request lifetime

pub mod dispatcher;
pub mod echo;
pub mod request;
pub mod response;

pub use dispatcher::{dispatch_fn, DispatchError, DispatchResult, FnDispatcher, NoProxy, ProxyDispatcher};
pub use echo::EchoDispatcher;
pub use request::{HttpMethod, ProxyRequest};
pub use response::ProxyResponse;
