//! Configuration schema definitions.
//!
//! All sections have defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::origin::DEFAULT_ORIGIN;
use crate::resolver::DEFAULT_DOCUMENT;
use crate::routing::DEFAULT_PROXY_PREFIX;

/// Root configuration for a resolver and its preview surface.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResolverConfig {
    /// Reserved origin and resource layout.
    pub origin: OriginConfig,

    /// Preview listener.
    pub listener: ListenerConfig,

    pub timeouts: TimeoutConfig,

    pub limits: LimitsConfig,

    /// Built-in host logic for the preview surface.
    pub proxy: ProxyConfig,

    pub observability: ObservabilityConfig,
}

/// Reserved origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Base URL of the reserved origin.
    pub url: String,

    /// Document served for the origin root.
    pub default_document: String,

    /// First path segment routed to host logic.
    pub proxy_prefix: String,

    /// Directory holding packaged application assets.
    pub asset_root: PathBuf,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ORIGIN.to_string(),
            default_document: DEFAULT_DOCUMENT.to_string(),
            proxy_prefix: DEFAULT_PROXY_PREFIX.to_string(),
            asset_root: PathBuf::from("wwwroot"),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upper bound on one request, host logic included, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest request body the preview surface will buffer, in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Answer every proxy call with a JSON description of the request.
    pub echo: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
