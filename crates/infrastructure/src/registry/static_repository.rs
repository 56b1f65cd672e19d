use async_trait::async_trait;
use switchyard_application::ports::ProjectRepository;
use switchyard_domain::{normalize_domain, DomainError, ProjectDomainRecord};

/// Project store backed by `registry.static_records` from the config file.
pub struct StaticProjectRepository {
    records: Vec<ProjectDomainRecord>,
}

impl StaticProjectRepository {
    pub fn new(records: impl IntoIterator<Item = ProjectDomainRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|mut r| {
                r.domain = normalize_domain(&r.domain).into();
                r
            })
            .collect();
        Self { records }
    }
}

#[async_trait]
impl ProjectRepository for StaticProjectRepository {
    async fn list_active(&self) -> Result<Vec<ProjectDomainRecord>, DomainError> {
        Ok(self.records.iter().filter(|r| r.active).cloned().collect())
    }

    async fn find_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<ProjectDomainRecord>, DomainError> {
        let domain = normalize_domain(domain);
        Ok(self
            .records
            .iter()
            .find(|r| r.active && *r.domain == *domain)
            .cloned())
    }
}
