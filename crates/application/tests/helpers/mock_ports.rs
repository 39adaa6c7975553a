#![allow(dead_code)]

use arpdns_application::ports::{
    AddressResolver, ArpClient, InterfaceBinding, NeighborProbe, RefreshOutcome,
    StaticHostTable,
};
use arpdns_domain::{EthersError, MacAddress, ResolutionError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockArpClient {
    replies: Arc<Mutex<HashMap<Ipv4Addr, MacAddress>>>,
    binding: Arc<Mutex<Option<InterfaceBinding>>>,
    deadlines: Arc<Mutex<Vec<Duration>>>,
    calls: Arc<AtomicUsize>,
}

impl MockArpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reply(&self, ip: &str, mac: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(ip.parse().unwrap(), mac.parse().unwrap());
    }

    pub fn set_binding(&self, ip: &str, mac: &str) {
        *self.binding.lock().unwrap() = Some(InterfaceBinding {
            ipv4: ip.parse().unwrap(),
            mac: mac.parse().unwrap(),
        });
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn deadlines(&self) -> Vec<Duration> {
        self.deadlines.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArpClient for MockArpClient {
    async fn resolve(
        &self,
        target: Ipv4Addr,
        deadline: Duration,
    ) -> Result<MacAddress, ResolutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.deadlines.lock().unwrap().push(deadline);
        self.replies
            .lock()
            .unwrap()
            .get(&target)
            .copied()
            .ok_or_else(|| ResolutionError::NoReply(target.to_string()))
    }

    fn binding(&self) -> Option<InterfaceBinding> {
        *self.binding.lock().unwrap()
    }
}

#[derive(Clone, Default)]
pub struct MockNeighborProbe {
    replies: Arc<Mutex<HashMap<Ipv6Addr, String>>>,
    interfaces: Arc<Mutex<Vec<String>>>,
}

impl MockNeighborProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reply(&self, ip: &str, output: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(ip.parse().unwrap(), output.to_string());
    }

    pub fn interfaces_seen(&self) -> Vec<String> {
        self.interfaces.lock().unwrap().clone()
    }
}

#[async_trait]
impl NeighborProbe for MockNeighborProbe {
    async fn probe(&self, target: Ipv6Addr, interface: &str) -> Result<String, ResolutionError> {
        self.interfaces.lock().unwrap().push(interface.to_string());
        self.replies
            .lock()
            .unwrap()
            .get(&target)
            .cloned()
            .ok_or_else(|| ResolutionError::NoReply(target.to_string()))
    }
}

#[derive(Clone, Default)]
pub struct MockAddressResolver {
    replies: Arc<Mutex<HashMap<String, Result<String, ResolutionError>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockAddressResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reply(&self, ip: &str, mac: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(ip.to_string(), Ok(mac.to_string()));
    }

    pub fn set_error(&self, ip: &str, error: ResolutionError) {
        self.replies
            .lock()
            .unwrap()
            .insert(ip.to_string(), Err(error));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AddressResolver for MockAddressResolver {
    async fn resolve(&self, target: &str) -> Result<String, ResolutionError> {
        self.requests.lock().unwrap().push(target.to_string());
        self.replies
            .lock()
            .unwrap()
            .get(target)
            .cloned()
            .unwrap_or_else(|| Err(ResolutionError::NoReply(target.to_string())))
    }
}

#[derive(Clone, Default)]
pub struct MockStaticHostTable {
    entries: Arc<Mutex<HashMap<String, Vec<String>>>>,
    refresh_error: Arc<Mutex<Option<EthersError>>>,
    refreshes: Arc<AtomicUsize>,
}

impl MockStaticHostTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, mac: &str, names: &[&str]) {
        self.entries.lock().unwrap().insert(
            mac.to_string(),
            names.iter().map(|n| n.to_string()).collect(),
        );
    }

    pub fn set_refresh_error(&self, error: EthersError) {
        *self.refresh_error.lock().unwrap() = Some(error);
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StaticHostTable for MockStaticHostTable {
    async fn refresh_if_stale(&self) -> Result<RefreshOutcome, EthersError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        match self.refresh_error.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(RefreshOutcome::Unchanged),
        }
    }

    fn lookup(&self, hardware_address: &str) -> Vec<String> {
        let Some(key) = MacAddress::canonicalize(hardware_address) else {
            return Vec::new();
        };
        self.entries
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }
}
