//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ResolverConfig (validated, immutable)
//!     → lifecycle::startup builds the resolver from it
//! ```
//!
//! # Design Decisions
//! - Config is fixed for the lifetime of a surface; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    LimitsConfig, ListenerConfig, ObservabilityConfig, OriginConfig, ProxyConfig, ResolverConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
