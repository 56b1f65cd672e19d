use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::proxy::ProxyConfig;
use super::registry::{RegistryConfig, RegistrySource};
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "switchyard.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/switchyard/config.toml";

/// Main configuration structure for Switchyard
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener ports and bind address for both daemons
    #[serde(default)]
    pub server: ServerConfig,

    /// Authoritative responder settings
    #[serde(default)]
    pub dns: DnsConfig,

    /// Reverse proxy limits and outbound pool
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Domain registry source and cache policy
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. switchyard.toml in current directory
    /// 3. /etc/switchyard/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(port) = overrides.proxy_port {
            self.server.proxy_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Validation(msg.to_string()));

        if self.server.dns_port == 0 {
            return invalid("DNS port cannot be 0");
        }
        if self.server.proxy_port == 0 {
            return invalid("Proxy port cannot be 0");
        }
        if self.server.bind_address.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid bind address '{}'",
                self.server.bind_address
            )));
        }
        if self.dns.max_udp_payload < 512 {
            return invalid("dns.max_udp_payload must be at least 512");
        }
        if self.dns.recv_buffer_size < 512 {
            return invalid("dns.recv_buffer_size must be at least 512");
        }
        if self.proxy.max_connections == 0 {
            return invalid("proxy.max_connections cannot be 0");
        }
        if self.proxy.body_limit_bytes == 0 {
            return invalid("proxy.body_limit_bytes cannot be 0");
        }
        if self.proxy.request_timeout_ms == 0 || self.proxy.connect_timeout_ms == 0 {
            return invalid("proxy timeouts cannot be 0");
        }
        if self.registry.refresh_interval_secs == 0 {
            return invalid("registry.refresh_interval_secs cannot be 0");
        }
        if self.registry.lookup_timeout_ms == 0 {
            return invalid("registry.lookup_timeout_ms cannot be 0");
        }
        if self.registry.source == RegistrySource::Static && self.registry.static_records.is_empty()
        {
            return invalid("registry.source is \"static\" but no static_records are configured");
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub proxy_port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
