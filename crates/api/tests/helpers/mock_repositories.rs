use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use switchyard_application::ports::{
    BackendForwarder, DomainRegistry, ProxyRequest, ProxyResponse, RegistryLookup,
};
use switchyard_application::use_cases::ResolveHostUseCase;
use switchyard_domain::{DomainError, ResolvedTarget};
use switchyard_proxy::ProxyState;

#[derive(Clone, Default)]
pub struct MockDomainRegistry {
    records: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<AtomicUsize>,
}

impl MockDomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, domain: &str, backend: &str) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(domain.to_string(), backend.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainRegistry for MockDomainRegistry {
    async fn lookup(&self, domain: &str) -> Result<RegistryLookup, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match self.records.lock().unwrap().get(domain) {
            Some(backend) => RegistryLookup::hit(backend.parse()?),
            None => RegistryLookup::miss(),
        })
    }
}

/// Records every forwarded request and answers with a fixed outcome.
#[derive(Clone)]
pub struct MockForwarder {
    seen: Arc<Mutex<Vec<(ResolvedTarget, ProxyRequest)>>>,
    failure: Option<DomainError>,
}

impl MockForwarder {
    pub fn ok() -> Self {
        Self {
            seen: Arc::default(),
            failure: None,
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            seen: Arc::default(),
            failure: Some(error),
        }
    }

    pub fn seen(&self) -> Vec<(ResolvedTarget, ProxyRequest)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackendForwarder for MockForwarder {
    async fn forward(
        &self,
        target: &ResolvedTarget,
        request: ProxyRequest,
    ) -> Result<ProxyResponse, DomainError> {
        self.seen
            .lock()
            .unwrap()
            .push((target.clone(), request.clone()));

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let mut headers = HeaderMap::new();
        headers.insert("x-backend", HeaderValue::from_static("mock"));
        let chunks = vec![
            Ok(Bytes::from_static(b"hello ")),
            Ok(Bytes::from(target.backend.to_string())),
        ];
        Ok(ProxyResponse {
            status: StatusCode::CREATED,
            headers,
            body: stream::iter(chunks).boxed(),
        })
    }
}

pub fn proxy_state(
    registry: MockDomainRegistry,
    forwarder: Arc<dyn BackendForwarder>,
    body_limit: usize,
) -> ProxyState {
    ProxyState {
        resolve_host: Arc::new(ResolveHostUseCase::new(Arc::new(registry))),
        forwarder,
        body_limit,
    }
}
