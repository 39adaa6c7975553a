use crate::EthersReloadJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()>;
}

impl SpawnableJob for EthersReloadJob {
    fn with_cancellation(self, token: CancellationToken) -> Self {
        self.with_cancellation(token)
    }

    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.start().await })
    }
}

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
) -> Option<tokio::task::JoinHandle<()>> {
    let job = job?;
    let job = match shutdown {
        Some(token) => job.with_cancellation(token.clone()),
        None => job,
    };
    Some(Arc::new(job).start_job())
}

pub struct JobRunner {
    ethers_reload: Option<EthersReloadJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            ethers_reload: None,
            shutdown: None,
        }
    }

    pub fn with_ethers_reload(mut self, job: EthersReloadJob) -> Self {
        self.ethers_reload = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawns every configured job and returns their handles.
    pub async fn start(self) -> Vec<tokio::task::JoinHandle<()>> {
        info!("Starting background job runner");

        let handles: Vec<_> = spawn_job(self.ethers_reload, &self.shutdown)
            .into_iter()
            .collect();

        info!(jobs = handles.len(), "Background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
