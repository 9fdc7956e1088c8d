//! Structured logging.
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level so operators can raise
//!   verbosity without editing config
//! - Safe to call more than once; later calls are no-ops

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber at `level` (`trace` .. `error`).
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_err() {
        tracing::debug!("Logging already initialised");
    }
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("origin_resolver={level},tower_http={level}"))
}
