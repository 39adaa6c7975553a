use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EthersConfig {
    #[serde(default = "default_path")]
    pub path: String,

    /// TTL of generated PTR records.
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Background reload period; 0 disables the job and leaves reloading to
    /// the per-query staleness check.
    #[serde(default)]
    pub reload_interval_secs: u64,
}

impl Default for EthersConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            ttl: default_ttl(),
            reload_interval_secs: 0,
        }
    }
}

fn default_path() -> String {
    "/etc/ethers".to_string()
}

fn default_ttl() -> u32 {
    3600
}
