use crate::ports::DomainRegistry;
use std::sync::Arc;
use switchyard_domain::{normalize_host, DomainError, ResolvedTarget};
use tracing::debug;

/// Maps the `Host` header of an inbound request to its backend.
pub struct ResolveHostUseCase {
    registry: Arc<dyn DomainRegistry>,
}

impl ResolveHostUseCase {
    pub fn new(registry: Arc<dyn DomainRegistry>) -> Self {
        Self { registry }
    }

    /// Resolves `host` (the raw header value) against the registry. Called
    /// once per request; targets are never reused across requests.
    pub async fn execute(&self, host: Option<&str>) -> Result<ResolvedTarget, DomainError> {
        let raw = host.ok_or(DomainError::MissingHost)?;
        let domain = normalize_host(raw)?;

        let lookup = self.registry.lookup(&domain).await?;
        match lookup.backend {
            Some(backend) => {
                debug!(domain = %domain, backend = %backend, "Host resolved");
                Ok(ResolvedTarget::new(domain, backend))
            }
            None => Err(DomainError::UnknownDomain(domain)),
        }
    }
}
