mod backend_forwarder;
mod domain_registry;
mod project_repository;
mod registry_refresh_port;

pub use backend_forwarder::{BackendForwarder, ProxyRequest, ProxyResponse, ResponseBody};
pub use domain_registry::{DomainRegistry, RegistryLookup};
pub use project_repository::ProjectRepository;
pub use registry_refresh_port::{RegistryRefreshOutcome, RegistryRefreshPort};
