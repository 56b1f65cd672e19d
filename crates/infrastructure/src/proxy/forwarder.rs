use super::headers::{forwarded_request_headers, strip_hop_by_hop};
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use switchyard_application::ports::{BackendForwarder, ProxyRequest, ProxyResponse};
use switchyard_domain::config::ProxyConfig;
use switchyard_domain::{BackendAddress, DomainError, ResolvedTarget};
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Outbound HTTP/1.1 client shared by all proxied requests.
///
/// Idle connections are pooled per backend by reqwest; the semaphore caps
/// in-flight calls across all backends. A permit is held until the response
/// body has been fully relayed or dropped.
pub struct ReqwestForwarder {
    client: reqwest::Client,
    permits: Arc<Semaphore>,
    acquire_timeout: Duration,
}

impl ReqwestForwarder {
    pub fn new(cfg: &ProxyConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("switchyard/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(cfg.max_connections)
            .pool_idle_timeout(cfg.keep_alive_timeout())
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.request_timeout())
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .http1_only()
            .build()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(cfg.max_connections)),
            acquire_timeout: cfg.pool_acquire_timeout(),
        })
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    fn map_error(error: reqwest::Error, backend: &BackendAddress) -> DomainError {
        let backend = backend.to_string();
        if error.is_connect() {
            DomainError::BackendUnavailable {
                backend,
                reason: error.to_string(),
            }
        } else if error.is_timeout() {
            DomainError::BackendTimeout { backend }
        } else {
            DomainError::BackendUnavailable {
                backend,
                reason: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl BackendForwarder for ReqwestForwarder {
    async fn forward(
        &self,
        target: &ResolvedTarget,
        request: ProxyRequest,
    ) -> Result<ProxyResponse, DomainError> {
        let permit = match timeout(self.acquire_timeout, self.permits.clone().acquire_owned()).await {
            Ok(Ok(permit)) => permit,
            _ => {
                warn!(backend = %target.backend, "Outbound pool exhausted");
                return Err(DomainError::PoolExhausted);
            }
        };

        let url = target.url(&request.path_and_query);
        let headers = forwarded_request_headers(
            &request.headers,
            request.host.as_deref(),
            request.client_addr,
        );
        debug!(method = %request.method, url = %url, "Forwarding request");

        let response = self
            .client
            .request(request.method, &url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| Self::map_error(e, &target.backend))?;

        let status = response.status();
        let headers = strip_hop_by_hop(response.headers());
        let body = response
            .bytes_stream()
            .map(move |chunk| {
                let _held = &permit;
                chunk.map_err(std::io::Error::other)
            })
            .boxed();

        Ok(ProxyResponse {
            status,
            headers,
            body,
        })
    }
}
