//! DNS Message Builder
//!
//! Constructs the wire-format query used to relay a deferred question upstream.

use arpdns_domain::ForwardError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Recursive query for `domain` with a random ID.
    ///
    /// Returns the ID together with the serialized message so the caller can
    /// match the response.
    pub fn build_query_with_id(
        domain: &str,
        record_type: HickoryRecordType,
    ) -> Result<(u16, Vec<u8>), ForwardError> {
        let name = Name::from_str(domain)
            .map_err(|e| ForwardError::InvalidQuery(format!("{}: {}", domain, e)))?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(record_type);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize(&message)?;
        Ok((id, bytes))
    }

    pub fn serialize(message: &Message) -> Result<Vec<u8>, ForwardError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            ForwardError::InvalidQuery(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
