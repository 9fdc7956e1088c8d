//! Origin Resolver preview server.
//!
//! Serves a UI bundle the way an embedded webview would see it: every request
//! is mapped onto the reserved origin and answered by the resolver.
//!
//! ```text
//!     Browser request                 ┌───────────────────────────────────────┐
//!     ────────────────────────────────┼─▶ http (request id, timeout, limits)  │
//!                                     │        │                              │
//!                                     │        ▼                              │
//!                                     │   RequestResolver                     │
//!                                     │     proxy → builtins → assets → 404   │
//!                                     │        │                              │
//!     Synthetic response              │        ▼                              │
//!     ◀───────────────────────────────┼── assembly (CORS, cache, redirects)   │
//!                                     └───────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use origin_resolver::config::{load_config, validate_config, ResolverConfig};
use origin_resolver::lifecycle::{build_resolver, signals, Shutdown};
use origin_resolver::observability::{init_logging, init_metrics};
use origin_resolver::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "origin-resolver")]
#[command(about = "Serve a UI bundle through the reserved-origin resolver", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the packaged UI assets.
    #[arg(long)]
    asset_root: Option<PathBuf>,

    /// Listener address, e.g. 127.0.0.1:8080.
    #[arg(long)]
    bind: Option<String>,

    /// Answer proxy calls with a JSON description of the request.
    #[arg(long)]
    echo: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ResolverConfig::default(),
    };
    if let Some(root) = args.asset_root {
        config.origin.asset_root = root;
    }
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if args.echo {
        config.proxy.echo = true;
    }
    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            eprintln!("invalid configuration: {error}");
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    init_logging(&config.observability.log_level);
    tracing::info!("origin-resolver v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let resolver = build_resolver(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        origin = %resolver.origin(),
        request_timeout_secs = config.timeouts.request_secs,
        "Listening for connections"
    );

    let shutdown = Arc::new(Shutdown::new());
    let rx = shutdown.subscribe();
    signals::spawn_signal_listener(Arc::clone(&shutdown));

    HttpServer::new(config, resolver).run(listener, rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
