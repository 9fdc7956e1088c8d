//! Reserved-origin subsystem.
//!
//! # Data Flow
//! ```text
//! raw request URL ("https://0.0.0.0/proxy/items?x=1")
//!     → query.rs (strip_query / parse_query, lexical only)
//!     → reserved.rs (is it beneath the origin? compute relative path)
//!     → "proxy/items"   or   None (defer to normal loading)
//! ```
//!
//! # Design Decisions
//! - The origin is injected configuration, never a compile-time constant
//! - Stripping is lexical so it cannot fail on malformed input
//! - URLs that don't parse are "not ours", never a 404

pub mod query;
pub mod reserved;

pub use query::{parse_query, strip_query, QueryParams};
pub use reserved::{OriginError, ReservedOrigin, DEFAULT_ORIGIN};
