use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use switchyard_domain::DomainError;
use switchyard_proxy::create_proxy_router;
use tower::ServiceExt;

mod helpers;
use helpers::{proxy_state, MockDomainRegistry, MockForwarder};

const LIMIT: usize = 1024;

fn registry() -> MockDomainRegistry {
    MockDomainRegistry::new().with_record("svc.example.com", "10.0.0.5:8080")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ── routing ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_request_is_forwarded_to_registered_backend() {
    let forwarder = MockForwarder::ok();
    let app = create_proxy_router(proxy_state(registry(), Arc::new(forwarder.clone()), LIMIT));

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/items/1?draft=true")
                .header("host", "SVC.example.com:8080")
                .body(Body::from("payload"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers().get("x-backend").unwrap(), "mock");
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"hello 10.0.0.5:8080");

    let seen = forwarder.seen();
    assert_eq!(seen.len(), 1);
    let (target, request) = &seen[0];
    assert_eq!(&*target.domain, "svc.example.com");
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path_and_query, "/items/1?draft=true");
    assert_eq!(request.host.as_deref(), Some("SVC.example.com:8080"));
    assert_eq!(&request.body[..], b"payload");
}

#[tokio::test]
async fn test_unknown_host_is_404_no_route() {
    let forwarder = MockForwarder::ok();
    let app = create_proxy_router(proxy_state(registry(), Arc::new(forwarder.clone()), LIMIT));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("host", "nobody.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "no route for host" }));
    assert!(forwarder.seen().is_empty());
}

#[tokio::test]
async fn test_missing_host_is_400_without_registry_lookup() {
    let registry = registry();
    let forwarder = MockForwarder::ok();
    let app = create_proxy_router(proxy_state(registry.clone(), Arc::new(forwarder.clone()), LIMIT));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(registry.call_count(), 0);
    assert!(forwarder.seen().is_empty());
}

#[tokio::test]
async fn test_malformed_host_is_400() {
    let registry = registry();
    let app = create_proxy_router(proxy_state(registry.clone(), Arc::new(MockForwarder::ok()), LIMIT));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("host", "svc.example.com:http")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(registry.call_count(), 0);
}

// ── body ceiling ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_declared_oversized_body_is_413() {
    let registry = registry();
    let forwarder = MockForwarder::ok();
    let app = create_proxy_router(proxy_state(registry.clone(), Arc::new(forwarder.clone()), LIMIT));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header("host", "svc.example.com")
                .header("content-length", (LIMIT + 1).to_string())
                .body(Body::from(vec![0u8; LIMIT + 1]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(registry.call_count(), 0);
    assert!(forwarder.seen().is_empty());
}

#[tokio::test]
async fn test_undeclared_oversized_body_is_413() {
    let forwarder = MockForwarder::ok();
    let app = create_proxy_router(proxy_state(registry(), Arc::new(forwarder.clone()), LIMIT));

    let chunks: Vec<Result<Vec<u8>, std::io::Error>> =
        (0..4).map(|_| Ok(vec![b'x'; LIMIT / 2])).collect();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header("host", "svc.example.com")
                .body(Body::from_stream(futures::stream::iter(chunks)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(forwarder.seen().is_empty());
}

#[tokio::test]
async fn test_body_at_limit_is_accepted() {
    let forwarder = MockForwarder::ok();
    let app = create_proxy_router(proxy_state(registry(), Arc::new(forwarder.clone()), LIMIT));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header("host", "svc.example.com")
                .body(Body::from(vec![b'x'; LIMIT]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(forwarder.seen()[0].1.body.len(), LIMIT);
}

#[tokio::test]
async fn test_broken_body_stream_is_400_without_transport_detail() {
    let forwarder = MockForwarder::ok();
    let app = create_proxy_router(proxy_state(registry(), Arc::new(forwarder.clone()), LIMIT));

    let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
        Ok(b"partial".to_vec()),
        Err(std::io::Error::other("invalid chunk size line")),
    ];
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header("host", "svc.example.com")
                .body(Body::from_stream(futures::stream::iter(chunks)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "invalid request body" }));
    assert!(!body.to_string().contains("chunk size"));
    assert!(forwarder.seen().is_empty());
}

// ── backend failures ───────────────────────────────────────────────────────

async fn status_for(error: DomainError) -> StatusCode {
    let app = create_proxy_router(proxy_state(
        registry(),
        Arc::new(MockForwarder::failing(error)),
        LIMIT,
    ));
    app.oneshot(
        Request::builder()
            .uri("/")
            .header("host", "svc.example.com")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
    .status()
}

#[tokio::test]
async fn test_backend_errors_map_to_gateway_statuses() {
    let unavailable = DomainError::BackendUnavailable {
        backend: "10.0.0.5:8080".into(),
        reason: "connection refused".into(),
    };
    let timeout = DomainError::BackendTimeout {
        backend: "10.0.0.5:8080".into(),
    };

    assert_eq!(status_for(unavailable).await, StatusCode::BAD_GATEWAY);
    assert_eq!(status_for(timeout).await, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(status_for(DomainError::PoolExhausted).await, StatusCode::SERVICE_UNAVAILABLE);
}
