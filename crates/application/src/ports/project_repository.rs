use async_trait::async_trait;
use switchyard_domain::{DomainError, ProjectDomainRecord};

/// Backing store of project domains. Read-only from this system.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All records with `active = true`.
    async fn list_active(&self) -> Result<Vec<ProjectDomainRecord>, DomainError>;

    /// Case-insensitive lookup of a single domain.
    async fn find_by_domain(&self, domain: &str)
        -> Result<Option<ProjectDomainRecord>, DomainError>;
}
