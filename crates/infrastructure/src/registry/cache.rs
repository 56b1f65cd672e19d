use super::snapshot::RegistrySnapshot;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use switchyard_application::ports::{
    DomainRegistry, ProjectRepository, RegistryLookup, RegistryRefreshOutcome,
    RegistryRefreshPort,
};
use switchyard_domain::config::RegistryConfig;
use switchyard_domain::{normalize_domain, DomainError};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Registry view shared by the name server and the proxy.
///
/// Readers take the current snapshot without locking. Reloads are serialized
/// by `refresh_lock`; a reader that finds the snapshot stale refreshes it in
/// line if nobody else is, and otherwise keeps serving what it has. Before
/// the first successful load every reader waits for one, bounded by
/// `lookup_timeout`.
pub struct CachedDomainRegistry {
    repository: Arc<dyn ProjectRepository>,
    snapshot: ArcSwap<RegistrySnapshot>,
    refresh_lock: Mutex<()>,
    refresh_interval: Duration,
    lookup_timeout: Duration,
}

impl CachedDomainRegistry {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        refresh_interval: Duration,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            snapshot: ArcSwap::from_pointee(RegistrySnapshot::empty()),
            refresh_lock: Mutex::new(()),
            refresh_interval,
            lookup_timeout,
        }
    }

    pub fn from_config(repository: Arc<dyn ProjectRepository>, cfg: &RegistryConfig) -> Self {
        Self::new(repository, cfg.refresh_interval(), cfg.lookup_timeout())
    }

    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snapshot.load_full()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Caller must hold `refresh_lock`.
    async fn reload_locked(&self) -> Result<usize, DomainError> {
        let records = self
            .repository
            .list_active()
            .await
            .map_err(|e| DomainError::RegistryUnavailable(e.to_string()))?;

        let snapshot = RegistrySnapshot::from_records(records);
        let count = snapshot.len();
        self.snapshot.store(Arc::new(snapshot));
        debug!(records = count, "Registry snapshot reloaded");
        Ok(count)
    }

    async fn ensure_loaded(&self) -> Result<Arc<RegistrySnapshot>, DomainError> {
        let _guard = self.refresh_lock.lock().await;
        let current = self.snapshot.load_full();
        if current.is_loaded() {
            return Ok(current);
        }
        let count = self.reload_locked().await?;
        info!(records = count, "Registry snapshot loaded");
        Ok(self.snapshot.load_full())
    }

    async fn refresh_stale(&self, current: Arc<RegistrySnapshot>) -> Arc<RegistrySnapshot> {
        let Ok(_guard) = self.refresh_lock.try_lock() else {
            return current;
        };

        let latest = self.snapshot.load_full();
        if !latest.is_stale(self.refresh_interval) {
            return latest;
        }

        match timeout(self.lookup_timeout, self.reload_locked()).await {
            Ok(Ok(_)) => self.snapshot.load_full(),
            Ok(Err(e)) => {
                warn!(error = %e, "Registry refresh failed, serving stale snapshot");
                latest
            }
            Err(_) => {
                warn!("Registry refresh timed out, serving stale snapshot");
                latest
            }
        }
    }
}

#[async_trait]
impl DomainRegistry for CachedDomainRegistry {
    async fn lookup(&self, domain: &str) -> Result<RegistryLookup, DomainError> {
        let domain = normalize_domain(domain);
        let current = self.snapshot.load_full();

        let snapshot = if !current.is_loaded() {
            match timeout(self.lookup_timeout, self.ensure_loaded()).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(domain = %domain, "Registry not loaded within lookup timeout");
                    return Err(DomainError::RegistryTimeout(domain));
                }
            }
        } else if current.is_stale(self.refresh_interval) {
            self.refresh_stale(current).await
        } else {
            current
        };

        Ok(match snapshot.get(&domain) {
            Some(backend) => RegistryLookup::hit(backend.clone()),
            None => RegistryLookup::miss(),
        })
    }
}

#[async_trait]
impl RegistryRefreshPort for CachedDomainRegistry {
    async fn refresh(&self) -> Result<RegistryRefreshOutcome, DomainError> {
        let Ok(_guard) = self.refresh_lock.try_lock() else {
            return Ok(RegistryRefreshOutcome {
                records: self.snapshot.load().len(),
                reloaded: false,
            });
        };

        let records = self.reload_locked().await?;
        Ok(RegistryRefreshOutcome {
            records,
            reloaded: true,
        })
    }
}
