use std::sync::Arc;

use axum::body::{to_bytes, Body};
use hyper::Request;
use tower::ServiceExt;

use hk_environment_mcp::clients::aqhi::AqhiFeedClient;
use hk_environment_mcp::infra::http_app::build_app;

const BODY_LIMIT: usize = 1024 * 1024;

#[tokio::test]
async fn healthz_answers_ok() {
    let client = AqhiFeedClient::with_url("http://127.0.0.1:1/feed.xml").unwrap();
    let app = build_app(Arc::new(client));

    let req = Request::builder()
        .method("GET")
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert!(resp.status().is_success());
    let bytes = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let client = AqhiFeedClient::with_url("http://127.0.0.1:1/feed.xml").unwrap();
    let app = build_app(Arc::new(client));

    let req = Request::builder()
        .method("GET")
        .uri("/v1/aqhi")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), hyper::StatusCode::NOT_FOUND);
}
