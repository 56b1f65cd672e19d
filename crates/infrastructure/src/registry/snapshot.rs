use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use switchyard_domain::{BackendAddress, ProjectDomainRecord};

/// Immutable view of the active projects at one point in time.
#[derive(Debug, Default)]
pub struct RegistrySnapshot {
    records: HashMap<Arc<str>, BackendAddress>,
    loaded_at: Option<Instant>,
}

impl RegistrySnapshot {
    /// The snapshot served before the first successful load.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = ProjectDomainRecord>) -> Self {
        let records = records
            .into_iter()
            .filter(|r| r.active)
            .map(|r| (r.domain, r.backend))
            .collect();
        Self {
            records,
            loaded_at: Some(Instant::now()),
        }
    }

    /// `domain` must already be normalized.
    pub fn get(&self, domain: &str) -> Option<&BackendAddress> {
        self.records.get(domain)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn is_stale(&self, max_age: Duration) -> bool {
        match self.loaded_at {
            Some(at) => at.elapsed() >= max_age,
            None => true,
        }
    }
}
