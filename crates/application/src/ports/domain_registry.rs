use async_trait::async_trait;
use switchyard_domain::{BackendAddress, DomainError};

/// Result of a registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryLookup {
    pub exists: bool,
    pub backend: Option<BackendAddress>,
}

impl RegistryLookup {
    pub fn hit(backend: BackendAddress) -> Self {
        Self {
            exists: true,
            backend: Some(backend),
        }
    }

    pub fn miss() -> Self {
        Self {
            exists: false,
            backend: None,
        }
    }
}

/// Read access to "domain -> backend address". Shared by the name server and
/// the reverse proxy; implementations normalize the domain to lowercase.
#[async_trait]
pub trait DomainRegistry: Send + Sync {
    async fn lookup(&self, domain: &str) -> Result<RegistryLookup, DomainError>;

    async fn exists(&self, domain: &str) -> Result<bool, DomainError> {
        Ok(self.lookup(domain).await?.exists)
    }

    async fn resolve(&self, domain: &str) -> Result<Option<BackendAddress>, DomainError> {
        Ok(self.lookup(domain).await?.backend)
    }
}
