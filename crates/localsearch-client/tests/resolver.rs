mod common;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use localsearch_client::{ConfigEvent, ConfigHandle, ConfigResolver};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Tunnel {
    url: Mutex<String>,
    cache_busters: Mutex<Vec<String>>,
    no_cache_headers: Mutex<bool>,
}

fn tunnel_app(tunnel: Arc<Tunnel>) -> Router {
    Router::new()
        .route(
            "/tunnel_config.json",
            get(
                |State(tunnel): State<Arc<Tunnel>>,
                 Query(params): Query<HashMap<String, String>>,
                 headers: HeaderMap| async move {
                    if let Some(t) = params.get("t") {
                        tunnel.cache_busters.lock().unwrap().push(t.clone());
                    }
                    *tunnel.no_cache_headers.lock().unwrap() =
                        headers.get("pragma").map(|v| v == "no-cache").unwrap_or(false);
                    let url = tunnel.url.lock().unwrap().clone();
                    Json(json!({ "rag_server_url": url, "updated_at": "2025-11-03 10:21:07" }))
                },
            ),
        )
        .route(
            "/broken.json",
            get(|| async { (StatusCode::OK, "<html>not json</html>") }),
        )
        .route(
            "/empty.json",
            get(|| async { Json(json!({ "rag_server_url": "" })) }),
        )
        .route(
            "/missing.json",
            get(|| async { (StatusCode::NOT_FOUND, "not found") }),
        )
        .with_state(tunnel)
}

fn tunnel(url: &str) -> Arc<Tunnel> {
    let tunnel = Tunnel::default();
    *tunnel.url.lock().unwrap() = url.to_string();
    Arc::new(tunnel)
}

#[tokio::test]
async fn test_resolve_applies_descriptor() {
    let state = tunnel("https://alpha-beta.trycloudflare.com");
    let site = common::serve(tunnel_app(state.clone())).await;
    let handle = ConfigHandle::new(common::config_for(
        "http://localhost:8000",
        &format!("{}/tunnel_config.json", site),
    ));
    let mut events = handle.subscribe();

    let config = ConfigResolver::new(handle.clone()).resolve().await;

    assert_eq!(config.server.base_url, "https://alpha-beta.trycloudflare.com");
    assert_eq!(handle.base_url(), "https://alpha-beta.trycloudflare.com");
    assert!(matches!(events.try_recv(), Ok(ConfigEvent::Loaded(_))));
    assert_eq!(state.cache_busters.lock().unwrap().len(), 1);
    assert!(*state.no_cache_headers.lock().unwrap());
}

#[tokio::test]
async fn test_resolve_twice_is_stable() {
    let state = tunnel("https://alpha-beta.trycloudflare.com");
    let site = common::serve(tunnel_app(state)).await;
    let handle = ConfigHandle::new(common::config_for(
        "http://localhost:8000",
        &format!("{}/tunnel_config.json", site),
    ));
    let mut events = handle.subscribe();
    let resolver = ConfigResolver::new(handle);

    let first = resolver.resolve().await;
    let second = resolver.resolve().await;

    assert_eq!(first.server.base_url, second.server.base_url);
    assert!(matches!(events.try_recv(), Ok(ConfigEvent::Loaded(_))));
    assert!(matches!(events.try_recv(), Ok(ConfigEvent::Loaded(_))));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_failures_keep_configured_url() {
    let site = common::serve(tunnel_app(tunnel("https://unused.example.org"))).await;
    let dead = common::dead_url().await;

    for location in [
        format!("{}/broken.json", site),
        format!("{}/empty.json", site),
        format!("{}/missing.json", site),
        format!("{}/tunnel_config.json", dead),
    ] {
        let handle = ConfigHandle::new(common::config_for("http://localhost:8000", &location));
        let mut events = handle.subscribe();

        let config = ConfigResolver::new(handle).resolve().await;

        assert_eq!(config.server.base_url, "http://localhost:8000", "{}", location);
        assert!(events.try_recv().is_err(), "{}", location);
    }
}

#[tokio::test]
async fn test_resolve_from_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tunnel_config.json");
    std::fs::write(
        &path,
        r#"{"rag_server_url": "https://local-file.trycloudflare.com"}"#,
    )
    .unwrap();

    let handle = ConfigHandle::new(common::config_for(
        "http://localhost:8000",
        path.to_str().unwrap(),
    ));
    let config = ConfigResolver::new(handle).resolve().await;
    assert_eq!(config.server.base_url, "https://local-file.trycloudflare.com");
}

#[tokio::test]
async fn test_refresh_publishes_only_changes() {
    let state = tunnel("https://first.trycloudflare.com");
    let site = common::serve(tunnel_app(state.clone())).await;
    let handle = ConfigHandle::new(common::config_for(
        "http://localhost:8000",
        &format!("{}/tunnel_config.json", site),
    ));
    let resolver = ConfigResolver::new(handle.clone());
    resolver.resolve().await;

    let mut events = handle.subscribe();
    assert!(!resolver.refresh().await);
    assert!(events.try_recv().is_err());

    *state.url.lock().unwrap() = "https://second.trycloudflare.com".to_string();
    assert!(resolver.refresh().await);

    assert_eq!(
        events.try_recv().unwrap(),
        ConfigEvent::UrlChanged {
            old: "https://first.trycloudflare.com".to_string(),
            new: "https://second.trycloudflare.com".to_string(),
        }
    );
    assert!(matches!(events.try_recv(), Ok(ConfigEvent::Updated(_))));
}

#[tokio::test]
async fn test_watch_picks_up_rotation() {
    let state = tunnel("https://first.trycloudflare.com");
    let site = common::serve(tunnel_app(state.clone())).await;
    let handle = ConfigHandle::new(common::config_for(
        "https://first.trycloudflare.com",
        &format!("{}/tunnel_config.json", site),
    ));
    let mut events = handle.subscribe();
    let task = ConfigResolver::new(handle.clone()).watch(Duration::from_millis(20));

    *state.url.lock().unwrap() = "https://rotated.trycloudflare.com".to_string();
    let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .unwrap()
        .unwrap();
    task.abort();

    assert!(matches!(event, ConfigEvent::UrlChanged { .. }));
    assert_eq!(handle.base_url(), "https://rotated.trycloudflare.com");
}

#[tokio::test]
async fn test_health_check() {
    let healthy = common::serve(Router::new().route(
        "/health",
        get(|| async { Json(json!({ "status": "ok" })) }),
    ))
    .await;
    let failing = common::serve(Router::new().route(
        "/health",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(Value::Null)) }),
    ))
    .await;
    let dead = common::dead_url().await;

    let resolver = ConfigResolver::new(ConfigHandle::default());
    for (url, expected) in [(healthy, true), (failing, false), (dead, false)] {
        let config = common::config_for(&url, "./tunnel_config.json");
        assert_eq!(resolver.check_health(&config).await, expected, "{}", url);
    }
}

#[tokio::test]
async fn test_health_check_times_out() {
    let slow = common::serve(Router::new().route(
        "/health",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            "ok"
        }),
    ))
    .await;

    let mut config = common::config_for(&slow, "./tunnel_config.json");
    config.timeouts.health_ms = 100;
    let resolver = ConfigResolver::new(ConfigHandle::default());
    assert!(!resolver.check_health(&config).await);
}
