use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use switchyard_application::ports::ProjectRepository;
use switchyard_domain::{normalize_domain, DomainError, ProjectDomainRecord};

#[derive(Clone, Default)]
pub struct MockProjectRepository {
    records: Arc<RwLock<Vec<ProjectDomainRecord>>>,
    loads: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, domain: &str, backend: &str) -> Self {
        self.insert(domain, backend);
        self
    }

    pub fn insert(&self, domain: &str, backend: &str) {
        self.records
            .write()
            .unwrap()
            .push(ProjectDomainRecord::new(domain, backend.parse().unwrap()));
    }

    pub fn deactivate(&self, domain: &str) {
        for record in self.records.write().unwrap().iter_mut() {
            if &*record.domain == domain {
                record.active = false;
            }
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().unwrap() = delay;
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectRepository for MockProjectRepository {
    async fn list_active(&self) -> Result<Vec<ProjectDomainRecord>, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection refused".into()));
        }

        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.active)
            .cloned()
            .collect())
    }

    async fn find_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<ProjectDomainRecord>, DomainError> {
        let domain = normalize_domain(domain);
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .find(|r| r.active && *r.domain == *domain)
            .cloned())
    }
}
