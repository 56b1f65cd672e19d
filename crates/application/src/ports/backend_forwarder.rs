use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use http::{HeaderMap, Method, StatusCode};
use std::net::SocketAddr;
use switchyard_domain::{DomainError, ResolvedTarget};

/// Streamed response body relayed from a backend.
pub type ResponseBody = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// One inbound HTTP request, body already bounded by the proxy's ceiling.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    /// Raw `Host` header value as received.
    pub host: Option<String>,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub client_addr: Option<SocketAddr>,
}

pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl std::fmt::Debug for ProxyResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait BackendForwarder: Send + Sync {
    /// Sends `request` to `target` and returns the backend's response.
    /// Connection failures map to `BackendUnavailable`, deadlines to
    /// `BackendTimeout`.
    async fn forward(
        &self,
        target: &ResolvedTarget,
        request: ProxyRequest,
    ) -> Result<ProxyResponse, DomainError>;
}
