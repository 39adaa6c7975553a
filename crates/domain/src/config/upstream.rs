use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Where queries go when the reverse lookup declines them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub servers: Vec<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl UpstreamConfig {
    /// First parseable server; `host:53` is assumed when the port is missing.
    pub fn primary(&self) -> Option<SocketAddr> {
        self.servers.iter().find_map(|s| parse_server(s))
    }
}

pub(crate) fn parse_server(server: &str) -> Option<SocketAddr> {
    server
        .parse::<SocketAddr>()
        .ok()
        .or_else(|| format!("{}:53", server).parse().ok())
        .or_else(|| format!("[{}]:53", server).parse().ok())
}

fn default_timeout_ms() -> u64 {
    2000
}
