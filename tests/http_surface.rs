mod common;

use origin_resolver::config::ResolverConfig;
use origin_resolver::lifecycle::build_resolver;
use origin_resolver::origin::ReservedOrigin;
use origin_resolver::providers::FileAssetStore;
use origin_resolver::proxy::{dispatch_fn, ProxyRequest, ProxyResponse};
use origin_resolver::RequestResolver;
use origin_sdk::OriginClient;

fn config_for(root: &std::path::Path) -> ResolverConfig {
    let mut config = ResolverConfig::default();
    config.origin.asset_root = root.to_path_buf();
    config.listener.bind_address = "127.0.0.1:0".into();
    config
}

#[tokio::test]
async fn test_serves_bundle() {
    let root = common::asset_root();
    let config = config_for(root.path());
    let resolver = build_resolver(&config).unwrap();
    let server = common::start_server(config, resolver).await;
    let client = OriginClient::new(&server.base_url()).unwrap();

    let index = client.fetch("/").await.unwrap();
    assert_eq!(index.status, 200);
    assert_eq!(index.header("Content-Type"), Some("text/html"));
    assert_eq!(index.header("Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(index.header("Accept-Ranges"), Some("bytes"));
    assert!(index.header("x-request-id").is_some());
    assert_eq!(index.text(), common::INDEX_HTML);

    let css = client.fetch("/css/site.css").await.unwrap();
    assert_eq!(css.header("content-type"), Some("text/css"));
    assert_eq!(css.header("content-length"), Some("14"));

    let missing = client.fetch("/nope.js").await.unwrap();
    assert_eq!(missing.status, 404);
    assert_eq!(missing.text(), "Resource not found (404)");

    server.stop().await;
}

#[tokio::test]
async fn test_echo_proxy_receives_method_headers_and_body() {
    let root = common::asset_root();
    let mut config = config_for(root.path());
    config.proxy.echo = true;
    let resolver = build_resolver(&config).unwrap();
    let server = common::start_server(config, resolver).await;
    let client = OriginClient::new(&server.base_url()).unwrap();

    let response = client
        .call(
            "PUT",
            "/proxy/items/7?tag=a&tag=b",
            Some(b"{\"name\":\"x\"}".to_vec()),
            &[("X-Client", "tests")],
        )
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), Some("application/json"));
    let report: serde_json::Value = response.json().unwrap();
    assert_eq!(report["method"], "PUT");
    assert_eq!(report["url"], "https://0.0.0.0/proxy/items/7?tag=a&tag=b");
    assert_eq!(report["query"]["tag"], "b");
    assert_eq!(report["headers"]["x-client"], "tests");
    assert_eq!(report["body"], "{\"name\":\"x\"}");

    server.stop().await;
}

#[tokio::test]
async fn test_redirect_reaches_client_unfollowed() {
    let resolver = RequestResolver::builder(ReservedOrigin::default())
        .dispatcher(dispatch_fn(|_req: ProxyRequest| async {
            Ok(Some(ProxyResponse::redirect(
                axum::http::StatusCode::FOUND,
                "https://example.test/",
            )))
        }))
        .build();
    let server = common::start_server(ResolverConfig::default(), resolver).await;
    let client = OriginClient::new(&server.base_url()).unwrap();

    let response = client.fetch("/proxy/login").await.unwrap();
    assert_eq!(response.status, 302);
    assert_eq!(response.header("location"), Some("https://example.test/"));
    assert!(response.header("access-control-allow-origin").is_none());
    assert!(response.body.is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let root = common::asset_root();
    let mut config = config_for(root.path());
    config.limits.max_body_size = 16;
    let resolver = RequestResolver::builder(ReservedOrigin::default())
        .assets(FileAssetStore::new(root.path()))
        .build();
    let server = common::start_server(config, resolver).await;
    let client = OriginClient::new(&server.base_url()).unwrap();

    let response = client.call("POST", "/proxy/upload", Some(vec![b'x'; 64]), &[]).await.unwrap();
    assert_eq!(response.status, 413);

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_method_served_as_get() {
    let root = common::asset_root();
    let config = config_for(root.path());
    let resolver = build_resolver(&config).unwrap();
    let server = common::start_server(config, resolver).await;
    let client = OriginClient::new(&server.base_url()).unwrap();

    let response = client.call("PATCH", "/index.html", None, &[]).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.text(), common::INDEX_HTML);

    server.stop().await;
}
