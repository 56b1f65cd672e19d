use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use switchyard_application::ports::{RegistryRefreshOutcome, RegistryRefreshPort};
use switchyard_domain::DomainError;

#[derive(Default)]
pub struct MockRegistryRefreshPort {
    calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockRegistryRefreshPort {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryRefreshPort for MockRegistryRefreshPort {
    async fn refresh(&self) -> Result<RegistryRefreshOutcome, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::RegistryUnavailable("mock failure".into()));
        }
        Ok(RegistryRefreshOutcome {
            records: 3,
            reloaded: true,
        })
    }
}
