//! Shared utilities for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

use origin_resolver::providers::{ProviderResult, Resource, ResourceProvider};
use origin_resolver::{HttpServer, RequestResolver, ResolverConfig, Shutdown};

pub const INDEX_HTML: &str = "<!doctype html><h1>app</h1>";

/// An asset root with a small UI bundle.
pub fn asset_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "index.html", INDEX_HTML);
    write(dir.path(), "css/site.css", "body{margin:0}");
    write(dir.path(), "img/LOGO.PNG", "\u{89}PNG");
    write(dir.path(), "my app.js", "console.log('hi')");
    write(dir.path(), "proxy/static.json", "{\"static\":true}");
    dir
}

pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// Wraps a provider and counts lookups.
pub struct Counting<P> {
    inner: P,
    calls: Arc<AtomicUsize>,
}

impl<P> Counting<P> {
    pub fn new(inner: P) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl<P: ResourceProvider> ResourceProvider for Counting<P> {
    async fn open(&self, relative_path: &str) -> ProviderResult<Option<Resource>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.open(relative_path).await
    }
}

pub fn count(calls: &AtomicUsize) -> usize {
    calls.load(Ordering::SeqCst)
}

/// A preview server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Arc<Shutdown>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

pub async fn start_server(config: ResolverConfig, resolver: RequestResolver) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Arc::new(Shutdown::new());
    let rx = shutdown.subscribe();

    let server = HttpServer::new(config, resolver);
    let handle = tokio::spawn(async move {
        server.run(listener, rx).await.unwrap();
    });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}
