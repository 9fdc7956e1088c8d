//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated [`ResolverConfig`] into a [`RequestResolver`]
//! - Pick the host logic the preview surface runs with
//!
//! # Design Decisions
//! - Fail fast on an unusable origin
//! - A missing asset root is only a warning: builtins and proxy calls still work

use std::sync::Arc;
use thiserror::Error;

use crate::config::ResolverConfig;
use crate::origin::{OriginError, ReservedOrigin};
use crate::providers::{BuiltinResources, FileAssetStore};
use crate::proxy::{EchoDispatcher, NoProxy, ProxyDispatcher};
use crate::resolver::RequestResolver;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid reserved origin {url:?}: {source}")]
    Origin {
        url: String,
        #[source]
        source: OriginError,
    },
}

/// Build a resolver from `config`, serving assets from `origin.asset_root`.
///
/// Host logic is [`EchoDispatcher`] when `proxy.echo` is set, otherwise none.
pub fn build_resolver(config: &ResolverConfig) -> Result<RequestResolver, StartupError> {
    let dispatcher: Arc<dyn ProxyDispatcher> = if config.proxy.echo {
        Arc::new(EchoDispatcher)
    } else {
        Arc::new(NoProxy)
    };
    build_resolver_with(config, dispatcher)
}

/// Build a resolver from `config` with the given host logic.
pub fn build_resolver_with(
    config: &ResolverConfig,
    dispatcher: Arc<dyn ProxyDispatcher>,
) -> Result<RequestResolver, StartupError> {
    let origin = ReservedOrigin::parse(&config.origin.url).map_err(|source| StartupError::Origin {
        url: config.origin.url.clone(),
        source,
    })?;

    let asset_root = &config.origin.asset_root;
    if !asset_root.is_dir() {
        tracing::warn!(
            asset_root = %asset_root.display(),
            "Asset root is not a directory; only builtin resources and proxy calls will resolve"
        );
    }

    let builtins = BuiltinResources::with_defaults(&origin, &config.origin.proxy_prefix);
    let resolver = RequestResolver::builder(origin)
        .default_document(config.origin.default_document.clone())
        .proxy_prefix(config.origin.proxy_prefix.clone())
        .shared_dispatcher(dispatcher)
        .builtins(builtins)
        .assets(FileAssetStore::new(asset_root.clone()))
        .build();

    tracing::info!(
        origin = %resolver.origin(),
        asset_root = %asset_root.display(),
        proxy_prefix = %config.origin.proxy_prefix,
        echo = config.proxy.echo,
        "Resolver ready"
    );

    Ok(resolver)
}
