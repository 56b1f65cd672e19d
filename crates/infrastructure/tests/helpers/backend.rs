use axum::body::Bytes;
use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

/// Loopback HTTP backend:
/// - `/slow` sleeps before answering
/// - `/status/418` answers with that status
/// - anything else echoes method, path and selected headers
pub async fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route("/slow", get(slow))
        .route("/status/418", get(|| async { StatusCode::IM_A_TEAPOT }))
        .fallback(any(echo));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "late"
}

async fn echo(request: Request) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let headers: HeaderMap = request.headers().clone();
    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_else(|_| Bytes::new());

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string()
    };

    let text = format!(
        "{} {} xff={} xfh={} xfp={} conn={} body={}",
        method,
        uri,
        header("x-forwarded-for"),
        header("x-forwarded-host"),
        header("x-forwarded-proto"),
        header("x-hop"),
        String::from_utf8_lossy(&body),
    );

    ([("x-backend", "echo"), ("connection", "close")], text).into_response()
}

/// An address with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
