use arpdns_domain::EthersError;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Backing file metadata matched the cached values; nothing was read.
    Unchanged,
    /// File was parsed and the table swapped. `entries` counts aliases.
    Reloaded { entries: usize },
}

#[async_trait]
pub trait StaticHostTable: Send + Sync {
    /// Re-reads the backing file only if its modification time or size changed.
    /// On error the previous table is kept.
    async fn refresh_if_stale(&self) -> Result<RefreshOutcome, EthersError>;

    /// Hostnames for `hardware_address` in file order. Unknown or malformed
    /// addresses yield an empty vector.
    fn lookup(&self, hardware_address: &str) -> Vec<String>;
}
