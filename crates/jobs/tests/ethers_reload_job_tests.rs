use arpdns_jobs::EthersReloadJob;
use std::sync::Arc;
use tokio::time::{sleep, timeout, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::MockStaticHostTable;

#[tokio::test]
async fn test_reload_job_refreshes_immediately_and_on_interval() {
    let table = Arc::new(MockStaticHostTable::new());
    let token = CancellationToken::new();

    let job = Arc::new(
        EthersReloadJob::new(table.clone())
            .with_interval(Duration::from_millis(20))
            .with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());

    sleep(Duration::from_millis(110)).await;
    token.cancel();
    handle.await.unwrap();

    assert!(
        table.refresh_count() >= 3,
        "expected several refreshes, got {}",
        table.refresh_count()
    );
}

#[tokio::test]
async fn test_reload_job_stops_on_cancellation() {
    let table = Arc::new(MockStaticHostTable::new());
    let token = CancellationToken::new();

    let job = Arc::new(
        EthersReloadJob::new(table.clone())
            .with_interval(Duration::from_millis(10))
            .with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());

    sleep(Duration::from_millis(30)).await;
    token.cancel();
    timeout(Duration::from_secs(1), handle)
        .await
        .expect("job should stop after cancellation")
        .unwrap();

    let after_stop = table.refresh_count();
    sleep(Duration::from_millis(50)).await;
    assert_eq!(table.refresh_count(), after_stop);
}

#[tokio::test]
async fn test_reload_job_keeps_running_after_failures() {
    let table = Arc::new(MockStaticHostTable::failing());
    let token = CancellationToken::new();

    let job = Arc::new(
        EthersReloadJob::new(table.clone())
            .with_interval(Duration::from_millis(15))
            .with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());

    sleep(Duration::from_millis(80)).await;
    token.cancel();
    handle.await.unwrap();

    assert!(table.refresh_count() >= 2);
}
