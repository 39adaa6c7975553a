use super::message_builder::MessageBuilder;
use crate::dns::transport::{DnsTransport, UdpTransport};
use arpdns_domain::ForwardError;
use hickory_proto::op::Message;
use hickory_proto::rr::RecordType as HickoryRecordType;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Next handler for queries the reverse lookup declines: re-asks the same
/// question upstream and hands back the parsed response.
pub struct UpstreamForwarder {
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(transport: Arc<dyn DnsTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn udp(server: SocketAddr, timeout: Duration) -> Self {
        Self::new(Arc::new(UdpTransport::new(server)), timeout)
    }

    pub fn peer(&self) -> String {
        self.transport.peer()
    }

    pub async fn forward(
        &self,
        domain: &str,
        record_type: HickoryRecordType,
    ) -> Result<Message, ForwardError> {
        let (id, query) = MessageBuilder::build_query_with_id(domain, record_type)?;

        let response = self.transport.send(&query, self.timeout).await?;

        let response_id = match response.bytes.as_slice() {
            [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
            _ => None,
        };
        if response_id != Some(id) {
            return Err(ForwardError::InvalidResponse(format!(
                "ID mismatch from {}",
                self.transport.peer()
            )));
        }

        let message = Message::from_vec(&response.bytes)
            .map_err(|e| ForwardError::InvalidResponse(e.to_string()))?;

        debug!(
            domain = %domain,
            record_type = ?record_type,
            upstream = %self.transport.peer(),
            protocol = response.protocol_used,
            rcode = ?message.response_code(),
            answers = message.answers().len(),
            "Deferred query answered upstream"
        );

        Ok(message)
    }
}
