use super::*;
use crate::config::Config;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tower::ServiceExt;


/// Router over a default configuration
fn test_router() -> Router {
    create_router(Arc::new(Config::default())).unwrap()
}

/// Router over a specific configuration
fn router_with(config: Config) -> Router {
    create_router(Arc::new(config)).unwrap()
}

/// Build a JSON POST /apkg request
fn apkg_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/apkg")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_api_server_spawns() {
    // Port 0 = OS assigns a free port
    let mut config = Config::default();
    config.server.bind_address = "127.0.0.1:0".parse().unwrap();
    let config = Arc::new(config);

    let api_handle = tokio::spawn(async move { start_api_server(config).await });

    // Give it a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    api_handle.abort();

    // The test passes if we got here without panicking
}

#[tokio::test]
async fn test_cors_enabled() {
    let mut config = Config::default();
    config.server.cors_enabled = true;
    config.server.cors_origins = vec!["*".to_string()];

    let app = router_with(config);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_disabled_by_default() {
    let app = test_router();

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be absent when CORS is disabled"
    );
}
