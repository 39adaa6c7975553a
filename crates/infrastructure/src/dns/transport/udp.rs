//! UDP transport for forwarded queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is, without framing. Truncated answers are relayed
//! unchanged; the client retries over TCP itself.

use super::{DnsTransport, TransportResponse};
use arpdns_domain::ForwardError;
use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn failure(&self, reason: impl ToString) -> ForwardError {
        ForwardError::Transport {
            server: self.server_addr.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, ForwardError> {
        // Ephemeral port in the upstream's address family
        let bind_addr = if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.failure(format!("bind failed: {}", e)))?;

        // One deadline for the whole exchange; stray datagrams do not extend it.
        let deadline = Instant::now() + timeout;

        let bytes_sent = timeout_at(deadline, socket.send_to(message_bytes, self.server_addr))
            .await
            .map_err(|_| ForwardError::Timeout(self.server_addr.to_string()))?
            .map_err(|e| self.failure(e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query forwarded");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let (bytes_received, from_addr) =
                timeout_at(deadline, socket.recv_from(&mut recv_buf))
                    .await
                    .map_err(|_| ForwardError::Timeout(self.server_addr.to_string()))?
                    .map_err(|e| self.failure(e))?;

            if from_addr != self.server_addr {
                warn!(
                    expected = %self.server_addr,
                    received_from = %from_addr,
                    "Dropping UDP response from unexpected source"
                );
                continue;
            }

            recv_buf.truncate(bytes_received);
            debug!(server = %self.server_addr, bytes_received, "UDP response received");

            return Ok(TransportResponse {
                bytes: recv_buf,
                protocol_used: "UDP",
            });
        }
    }

    fn peer(&self) -> String {
        self.server_addr.to_string()
    }
}
