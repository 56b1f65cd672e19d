use crate::bootstrap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use switchyard_application::ports::ProjectRepository;
use switchyard_application::use_cases::{HandleDnsQueryUseCase, ResolveHostUseCase};
use switchyard_domain::config::RegistrySource;
use switchyard_domain::Config;
use switchyard_infrastructure::proxy::ReqwestForwarder;
use switchyard_infrastructure::registry::{CachedDomainRegistry, StaticProjectRepository};
use switchyard_infrastructure::repositories::SqliteProjectRepository;
use switchyard_proxy::ProxyState;
use tracing::info;

/// Everything both daemons share, wired once at startup.
pub struct Services {
    pub registry: Arc<CachedDomainRegistry>,
    pub handle_dns_query: Arc<HandleDnsQueryUseCase>,
    pub proxy_state: ProxyState,
}

impl Services {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let repository = Self::build_repository(config).await?;
        let registry = Arc::new(CachedDomainRegistry::from_config(
            repository,
            &config.registry,
        ));

        let answer_address: Option<Ipv4Addr> = config.dns.answer_address;
        let handle_dns_query = Arc::new(
            HandleDnsQueryUseCase::new(registry.clone(), config.dns.answer_ttl)
                .with_answer_address(answer_address),
        );

        let proxy_state = ProxyState {
            resolve_host: Arc::new(ResolveHostUseCase::new(registry.clone())),
            forwarder: Arc::new(ReqwestForwarder::new(&config.proxy)?),
            body_limit: config.proxy.body_limit_bytes,
        };

        Ok(Self {
            registry,
            handle_dns_query,
            proxy_state,
        })
    }

    async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn ProjectRepository>> {
        match config.registry.source {
            RegistrySource::Sqlite => {
                let pool = bootstrap::init_database(&config.database).await?;
                Ok(Arc::new(SqliteProjectRepository::new(pool)))
            }
            RegistrySource::Static => {
                info!(
                    records = config.registry.static_records.len(),
                    "Using static registry records"
                );
                Ok(Arc::new(StaticProjectRepository::new(
                    config.registry.static_records.clone(),
                )))
            }
        }
    }
}
