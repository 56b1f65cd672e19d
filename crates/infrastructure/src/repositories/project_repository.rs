use async_trait::async_trait;
use sqlx::SqlitePool;
use switchyard_application::ports::ProjectRepository;
use switchyard_domain::{normalize_domain, BackendAddress, DomainError, ProjectDomainRecord};
use tracing::{error, instrument, warn};

type ProjectRow = (String, String, i64);

/// Read-only view of the `projects` table.
pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Rows with an unparseable backend address are skipped rather than
    /// failing the whole load.
    fn row_to_record(row: ProjectRow) -> Option<ProjectDomainRecord> {
        let (domain, backend_address, active) = row;
        match backend_address.parse::<BackendAddress>() {
            Ok(backend) => {
                let mut record = ProjectDomainRecord::new(&domain, backend);
                record.active = active != 0;
                Some(record)
            }
            Err(e) => {
                warn!(domain = %domain, error = %e, "Skipping project with invalid backend address");
                None
            }
        }
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    #[instrument(skip(self))]
    async fn list_active(&self) -> Result<Vec<ProjectDomainRecord>, DomainError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT domain, backend_address, active
             FROM projects WHERE active = 1 ORDER BY domain ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query active projects");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().filter_map(Self::row_to_record).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<ProjectDomainRecord>, DomainError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT domain, backend_address, active
             FROM projects WHERE domain = ? COLLATE NOCASE AND active = 1",
        )
        .bind(normalize_domain(domain))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query project by domain");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.and_then(Self::row_to_record))
    }
}
