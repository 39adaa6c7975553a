use arpdns_domain::ResolutionError;
use async_trait::async_trait;
use std::net::Ipv6Addr;

/// IPv6 neighbor discovery. The returned string is the hardware address as
/// reported by the prober, unmodified.
#[async_trait]
pub trait NeighborProbe: Send + Sync {
    async fn probe(&self, target: Ipv6Addr, interface: &str) -> Result<String, ResolutionError>;
}
