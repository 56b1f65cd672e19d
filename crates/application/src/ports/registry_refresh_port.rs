use async_trait::async_trait;
use switchyard_domain::DomainError;

/// Outcome of a registry snapshot reload.
#[derive(Debug, Default, Clone)]
pub struct RegistryRefreshOutcome {
    pub records: usize,
    /// False when another refresh was already in flight and this one yielded.
    pub reloaded: bool,
}

#[async_trait]
pub trait RegistryRefreshPort: Send + Sync {
    async fn refresh(&self) -> Result<RegistryRefreshOutcome, DomainError>;
}
