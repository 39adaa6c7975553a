use arpdns_application::ports::{RefreshOutcome, StaticHostTable};
use arpdns_domain::EthersError;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const DEFAULT_RELOAD_INTERVAL_SECS: u64 = 60;

/// Keeps the static table fresh between queries so a lookup rarely pays for
/// a re-parse.
pub struct EthersReloadJob {
    table: Arc<dyn StaticHostTable>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl EthersReloadJob {
    pub fn new(table: Arc<dyn StaticHostTable>) -> Self {
        Self {
            table,
            interval: Duration::from_secs(DEFAULT_RELOAD_INTERVAL_SECS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting ethers reload job"
        );

        let mut interval = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("EthersReloadJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.table.refresh_if_stale().await {
                        Ok(RefreshOutcome::Reloaded { entries }) => {
                            info!(entries, "Ethers table reloaded");
                        }
                        Ok(RefreshOutcome::Unchanged) => {}
                        Err(e @ EthersError::FileUnavailable { .. }) => {
                            debug!(error = %e, "Ethers file not available");
                        }
                        Err(e) => {
                            warn!(error = %e, "Ethers reload failed");
                        }
                    }
                }
            }
        }
    }
}
