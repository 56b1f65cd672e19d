#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use switchyard_application::ports::{DomainRegistry, RegistryLookup};
use switchyard_domain::{BackendAddress, DomainError};

#[derive(Clone, Default)]
pub struct MockDomainRegistry {
    records: Arc<Mutex<HashMap<String, BackendAddress>>>,
    errors: Arc<Mutex<HashMap<String, DomainError>>>,
    calls: Arc<AtomicUsize>,
    looked_up: Arc<Mutex<Vec<String>>>,
}

impl MockDomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, domain: &str, backend: &str) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(domain.to_string(), backend.parse().unwrap());
        self
    }

    pub fn fail_with(self, domain: &str, error: DomainError) -> Self {
        self.errors
            .lock()
            .unwrap()
            .insert(domain.to_string(), error);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn looked_up(&self) -> Vec<String> {
        self.looked_up.lock().unwrap().clone()
    }
}

#[async_trait]
impl DomainRegistry for MockDomainRegistry {
    async fn lookup(&self, domain: &str) -> Result<RegistryLookup, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.looked_up.lock().unwrap().push(domain.to_string());

        if let Some(error) = self.errors.lock().unwrap().get(domain) {
            return Err(error.clone());
        }

        Ok(match self.records.lock().unwrap().get(domain) {
            Some(backend) => RegistryLookup::hit(backend.clone()),
            None => RegistryLookup::miss(),
        })
    }
}
