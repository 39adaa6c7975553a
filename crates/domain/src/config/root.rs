use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::ethers::EthersConfig;
use super::logging::LoggingConfig;
use super::neighbor::NeighborConfig;
use super::server::ServerConfig;
use super::upstream::{parse_server, UpstreamConfig};

const LOCAL_CONFIG_PATH: &str = "arpdns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/arpdns/config.toml";

/// Main configuration structure for arpdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// DNS listener configuration (port, bind address, query budget)
    #[serde(default)]
    pub server: ServerConfig,

    /// ARP / neighbor discovery configuration
    #[serde(default)]
    pub neighbor: NeighborConfig,

    /// Static hardware-address → hostname table
    #[serde(default)]
    pub ethers: EthersConfig,

    /// Upstream used for queries the reverse lookup defers
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. arpdns.toml in current directory
    /// 3. /etc/arpdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
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
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(interface) = overrides.interface {
            self.neighbor.interface = interface;
        }
        if let Some(path) = overrides.ethers_path {
            self.ethers.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    ///
    /// Resolver timeouts must be strictly below the query budget, otherwise a
    /// slow neighbor would stall the client past its own deadline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.neighbor.interface.trim().is_empty() {
            return Err(ConfigError::Validation(
                "No network interface configured".to_string(),
            ));
        }

        if self.ethers.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "No ethers file path configured".to_string(),
            ));
        }

        if self.neighbor.arp_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "ARP timeout cannot be 0".to_string(),
            ));
        }

        if self.neighbor.arp_timeout_ms >= self.server.query_timeout_ms {
            return Err(ConfigError::Validation(format!(
                "ARP timeout ({}ms) must be below the query timeout ({}ms)",
                self.neighbor.arp_timeout_ms, self.server.query_timeout_ms
            )));
        }

        if self.neighbor.probe_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Neighbor probe timeout cannot be 0".to_string(),
            ));
        }

        if self.neighbor.probe_timeout_ms >= self.server.query_timeout_ms {
            return Err(ConfigError::Validation(format!(
                "Neighbor probe timeout ({}ms) must be below the query timeout ({}ms)",
                self.neighbor.probe_timeout_ms, self.server.query_timeout_ms
            )));
        }

        for server in &self.upstream.servers {
            if parse_server(server).is_none() {
                return Err(ConfigError::Validation(format!(
                    "Invalid upstream server '{}'",
                    server
                )));
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub interface: Option<String>,
    pub ethers_path: Option<String>,
    pub log_level: Option<String>,
}
