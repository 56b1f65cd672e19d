use crate::errors::ProxyError;
use crate::state::ProxyState;
use axum::body::{Body, Bytes};
use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::{CONTENT_LENGTH, HOST};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::net::SocketAddr;
use std::time::Instant;
use switchyard_application::ports::ProxyRequest;
use switchyard_domain::DomainError;
use tracing::{debug, error, info, warn};

pub async fn proxy_request(State(state): State<ProxyState>, request: Request) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    debug!(method = %method, path = %path, "Proxy request received");

    let result = match request_host(&request) {
        Ok(host) => forward(&state, request, host).await,
        Err(e) => Err(e),
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok((host, response)) => {
            info!(
                method = %method,
                host = %host,
                path = %path,
                status = response.status().as_u16(),
                elapsed_ms,
                "Proxied request"
            );
            response
        }
        Err(e) => {
            let status = e.status();
            if status.is_server_error() {
                error!(method = %method, path = %path, status = status.as_u16(), error = %e, elapsed_ms, "Proxy request failed");
            } else {
                warn!(method = %method, path = %path, status = status.as_u16(), error = %e, elapsed_ms, "Proxy request rejected");
            }
            e.into_response()
        }
    }
}

/// `Host` header, falling back to the request-target authority.
fn request_host(request: &Request) -> Result<Option<String>, ProxyError> {
    match request.headers().get(HOST) {
        Some(value) => value
            .to_str()
            .map(|v| Some(v.to_string()))
            .map_err(|_| DomainError::InvalidHost("<non-ascii>".to_string()).into()),
        None => Ok(request.uri().authority().map(|a| a.to_string())),
    }
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, ProxyError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(DomainError::PayloadTooLarge { limit }.into())
        }
        Err(e) => Err(ProxyError::Body(e.to_string())),
    }
}

async fn forward(
    state: &ProxyState,
    request: Request,
    host: Option<String>,
) -> Result<(String, Response), ProxyError> {
    let (parts, body) = request.into_parts();

    if declared_length(&parts.headers).is_some_and(|len| len > state.body_limit as u64) {
        return Err(DomainError::PayloadTooLarge {
            limit: state.body_limit,
        }
        .into());
    }

    let target = state.resolve_host.execute(host.as_deref()).await?;
    let body = read_body(body, state.body_limit).await?;

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    let client_addr = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);

    let upstream = state
        .forwarder
        .forward(
            &target,
            ProxyRequest {
                method: parts.method,
                host,
                path_and_query,
                headers: parts.headers,
                body,
                client_addr,
            },
        )
        .await?;

    let mut response = Response::new(Body::from_stream(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = upstream.headers;
    Ok((target.domain.to_string(), response))
}
