use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Budget for answering a single query. Resolver timeouts must stay below it.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_query_timeout_ms() -> u64 {
    2000
}
