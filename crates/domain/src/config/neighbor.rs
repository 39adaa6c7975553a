use serde::{Deserialize, Serialize};

/// Link-layer resolution settings for the bound interface.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NeighborConfig {
    /// Interface used for ARP requests and passed to the IPv6 probe.
    #[serde(default = "default_interface")]
    pub interface: String,

    /// Absolute deadline of a single ARP exchange.
    #[serde(default = "default_arp_timeout_ms")]
    pub arp_timeout_ms: u64,

    /// Neighbor discovery tool, invoked as `<cmd> -q <address> <interface>`.
    #[serde(default = "default_probe_command")]
    pub probe_command: String,

    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Answer for the interface's own IPv4 address with its own MAC.
    /// A host never ARP-replies to itself, so without this such queries defer.
    #[serde(default)]
    pub resolve_own_address: bool,
}

impl Default for NeighborConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            arp_timeout_ms: default_arp_timeout_ms(),
            probe_command: default_probe_command(),
            probe_timeout_ms: default_probe_timeout_ms(),
            resolve_own_address: false,
        }
    }
}

fn default_interface() -> String {
    "eth0".to_string()
}

fn default_arp_timeout_ms() -> u64 {
    1000
}

fn default_probe_command() -> String {
    "ndisc6".to_string()
}

fn default_probe_timeout_ms() -> u64 {
    1500
}
