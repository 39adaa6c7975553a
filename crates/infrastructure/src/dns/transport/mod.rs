pub mod udp;

use arpdns_domain::ForwardError;
use async_trait::async_trait;
use std::time::Duration;

pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, ForwardError>;

    /// Human-readable peer, used in logs and errors.
    fn peer(&self) -> String;
}
