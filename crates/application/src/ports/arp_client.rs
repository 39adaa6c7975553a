use arpdns_domain::{MacAddress, ResolutionError};
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Addresses of the interface an [`ArpClient`] is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceBinding {
    pub ipv4: Ipv4Addr,
    pub mac: MacAddress,
}

#[async_trait]
pub trait ArpClient: Send + Sync {
    /// Sends a who-has for `target` and waits for the reply, giving up once
    /// `deadline` has elapsed.
    async fn resolve(
        &self,
        target: Ipv4Addr,
        deadline: Duration,
    ) -> Result<MacAddress, ResolutionError>;

    fn binding(&self) -> Option<InterfaceBinding> {
        None
    }
}
