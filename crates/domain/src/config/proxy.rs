use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    /// Upper bound on concurrent outbound backend calls.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    #[serde(default = "default_keep_alive_timeout_secs")]
    pub keep_alive_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// How long a request may queue for a free outbound slot.
    #[serde(default = "default_pool_acquire_timeout_ms")]
    pub pool_acquire_timeout_ms: u64,

    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl ProxyConfig {
    pub fn keep_alive_timeout(&self) -> Duration {
        Duration::from_secs(self.keep_alive_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn pool_acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.pool_acquire_timeout_ms)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            keep_alive_timeout_secs: default_keep_alive_timeout_secs(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            pool_acquire_timeout_ms: default_pool_acquire_timeout_ms(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

fn default_max_connections() -> usize {
    128
}

fn default_keep_alive_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_ms() -> u64 {
    3_000
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_pool_acquire_timeout_ms() -> u64 {
    1_000
}

fn default_body_limit_bytes() -> usize {
    10 * 1024 * 1024
}
