use crate::project::ProjectDomainRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrySource {
    #[default]
    Sqlite,
    Static,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub source: RegistrySource,

    /// Age after which the cached registry snapshot is reloaded.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Records served when `source = "static"`.
    #[serde(default)]
    pub static_records: Vec<ProjectDomainRecord>,
}

impl RegistryConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            source: RegistrySource::default(),
            refresh_interval_secs: default_refresh_interval_secs(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            static_records: Vec::new(),
        }
    }
}

fn default_refresh_interval_secs() -> u64 {
    5
}

fn default_lookup_timeout_ms() -> u64 {
    500
}
