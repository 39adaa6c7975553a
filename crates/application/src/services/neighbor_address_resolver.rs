use crate::ports::{AddressResolver, ArpClient, NeighborProbe};
use arpdns_domain::ResolutionError;
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const DEFAULT_ARP_DEADLINE: Duration = Duration::from_secs(1);

/// Dispatches on address family: ARP for IPv4, neighbor discovery for IPv6.
pub struct NeighborAddressResolver {
    arp: Arc<dyn ArpClient>,
    probe: Arc<dyn NeighborProbe>,
    interface: String,
    arp_deadline: Duration,
    resolve_own_address: bool,
}

impl NeighborAddressResolver {
    pub fn new(
        arp: Arc<dyn ArpClient>,
        probe: Arc<dyn NeighborProbe>,
        interface: impl Into<String>,
    ) -> Self {
        Self {
            arp,
            probe,
            interface: interface.into(),
            arp_deadline: DEFAULT_ARP_DEADLINE,
            resolve_own_address: false,
        }
    }

    /// Deadline of each ARP exchange. Keep it below the DNS query timeout.
    pub fn with_arp_deadline(mut self, deadline: Duration) -> Self {
        self.arp_deadline = deadline;
        self
    }

    /// Answer the bound interface's own IPv4 address from its binding instead
    /// of deferring (the host never ARP-replies to itself).
    pub fn with_own_address_resolution(mut self, enabled: bool) -> Self {
        self.resolve_own_address = enabled;
        self
    }

    async fn resolve_ipv4(&self, target: Ipv4Addr) -> Result<String, ResolutionError> {
        if self.resolve_own_address {
            if let Some(binding) = self.arp.binding().filter(|b| b.ipv4 == target) {
                debug!(ip = %target, mac = %binding.mac, "Target is the bound interface");
                return Ok(binding.mac.to_string());
            }
        }

        let mac = self.arp.resolve(target, self.arp_deadline).await?;
        Ok(mac.to_string())
    }
}

#[async_trait]
impl AddressResolver for NeighborAddressResolver {
    async fn resolve(&self, target: &str) -> Result<String, ResolutionError> {
        let addr: IpAddr = target
            .parse()
            .map_err(|_| ResolutionError::InvalidAddress(target.to_string()))?;

        match addr {
            IpAddr::V6(v6) => {
                debug!(ip = %v6, interface = %self.interface, "Probing IPv6 neighbor");
                self.probe.probe(v6, &self.interface).await
            }
            IpAddr::V4(v4) => {
                debug!(ip = %v4, deadline_ms = self.arp_deadline.as_millis() as u64, "Sending ARP request");
                self.resolve_ipv4(v4).await
            }
        }
    }
}
