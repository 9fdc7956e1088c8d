//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! resolver, adapters, HTTP surface produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and histograms)
//!     → tracing.rs (per-resolution spans with request ids)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
pub mod tracing;

pub use self::logging::init_logging;
pub use self::metrics::init_metrics;
