mod cache;
mod snapshot;
mod static_repository;

pub use cache::CachedDomainRegistry;
pub use snapshot::RegistrySnapshot;
pub use static_repository::StaticProjectRepository;
