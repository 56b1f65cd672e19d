pub mod registry_refresh;
pub mod runner;

pub use registry_refresh::RegistryRefreshJob;
pub use runner::JobRunner;
