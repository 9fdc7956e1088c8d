//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: ResolverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ResolverConfig;
use crate::origin::ReservedOrigin;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("origin.url is invalid: {0}")]
    InvalidOrigin(String),

    #[error("origin.default_document must be a relative file name, got {0:?}")]
    InvalidDefaultDocument(String),

    #[error("origin.proxy_prefix must be a single non-empty path segment, got {0:?}")]
    InvalidProxyPrefix(String),

    #[error("{field} is not a socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("observability.log_level must be one of trace, debug, info, warn, error; got {0:?}")]
    InvalidLogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Check semantic constraints serde cannot express.
pub fn validate_config(config: &ResolverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = ReservedOrigin::parse(&config.origin.url) {
        errors.push(ValidationError::InvalidOrigin(e.to_string()));
    }

    let document = config.origin.default_document.as_str();
    if document.is_empty() || document.starts_with('/') || document.split(['/', '\\']).any(|s| s == "..") {
        errors.push(ValidationError::InvalidDefaultDocument(document.to_string()));
    }

    let prefix = config.origin.proxy_prefix.trim_matches(['/', '\\']);
    if prefix.is_empty() || prefix.contains(['/', '\\']) {
        errors.push(ValidationError::InvalidProxyPrefix(config.origin.proxy_prefix.clone()));
    }

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(&mut errors, "observability.metrics_address", &config.observability.metrics_address);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::Zero("limits.max_body_size"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&ResolverConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ResolverConfig::default();
        config.origin.url = "not a url".into();
        config.origin.proxy_prefix = "api/v1".into();
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::InvalidOrigin(_)));
        assert_eq!(errors[1], ValidationError::InvalidProxyPrefix("api/v1".into()));
        assert_eq!(errors[2], ValidationError::Zero("timeouts.request_secs"));
        assert_eq!(errors[3], ValidationError::InvalidLogLevel("loud".into()));
    }

    #[test]
    fn test_default_document_must_stay_inside_root() {
        let mut config = ResolverConfig::default();
        config.origin.default_document = "../secret.html".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidDefaultDocument("../secret.html".into())]);
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ResolverConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidAddress {
                field: "observability.metrics_address",
                value: "nowhere".into()
            }]
        );
    }
}
