#![allow(dead_code)]

use arpdns_application::ports::{RefreshOutcome, StaticHostTable};
use arpdns_domain::EthersError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub struct MockStaticHostTable {
    refresh_count: AtomicU64,
    should_fail: AtomicBool,
}

impl MockStaticHostTable {
    pub fn new() -> Self {
        Self {
            refresh_count: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let table = Self::new();
        table.should_fail.store(true, Ordering::Relaxed);
        table
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl StaticHostTable for MockStaticHostTable {
    async fn refresh_if_stale(&self) -> Result<RefreshOutcome, EthersError> {
        let count = self.refresh_count.fetch_add(1, Ordering::Relaxed);

        if self.should_fail.load(Ordering::Relaxed) {
            return Err(EthersError::MalformedEntry {
                line: 1,
                value: "bad".to_string(),
            });
        }

        if count == 0 {
            Ok(RefreshOutcome::Reloaded { entries: 1 })
        } else {
            Ok(RefreshOutcome::Unchanged)
        }
    }

    fn lookup(&self, _hardware_address: &str) -> Vec<String> {
        Vec::new()
    }
}
