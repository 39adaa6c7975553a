use arpdns_application::ports::{RefreshOutcome, StaticHostTable};
use arpdns_domain::EthersError;
use tracing::{info, warn};

/// First read of the ethers file, so a missing or broken file shows up in the
/// startup log instead of on the first PTR query. Never fatal.
pub async fn load_ethers(table: &dyn StaticHostTable, path: &str) -> Option<usize> {
    match table.refresh_if_stale().await {
        Ok(RefreshOutcome::Reloaded { entries }) => {
            info!(path = %path, entries, "Loaded ethers file");
            Some(entries)
        }
        Ok(RefreshOutcome::Unchanged) => None,
        Err(e @ EthersError::FileUnavailable { .. }) => {
            warn!(error = %e, "Ethers file unavailable, answering with hardware addresses");
            None
        }
        Err(e) => {
            warn!(path = %path, error = %e, "Ethers file rejected");
            None
        }
    }
}
