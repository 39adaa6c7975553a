use crate::dns::forwarding::{RecordTypeMapper, UpstreamForwarder};
use arpdns_application::use_cases::ReverseLookupUseCase;
use arpdns_domain::{LookupOutcome, PtrAnswer, ReverseQuery};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::PTR;
use hickory_proto::rr::{Name, RData, Record, RecordType as HickoryRecordType};
use hickory_proto::ProtoError;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(2);

pub struct DnsServerHandler {
    use_case: Arc<ReverseLookupUseCase>,
    forwarder: Option<Arc<UpstreamForwarder>>,
    query_timeout: Duration,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ReverseLookupUseCase>) -> Self {
        Self {
            use_case,
            forwarder: None,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_forwarder(mut self, forwarder: Arc<UpstreamForwarder>) -> Self {
        self.forwarder = Some(forwarder);
        self
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    async fn lookup(&self, name: &str, query_type: HickoryRecordType) -> LookupOutcome {
        let query = ReverseQuery::new(name, RecordTypeMapper::from_hickory(query_type));
        match tokio::time::timeout(self.query_timeout, self.use_case.execute(&query)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                debug!(
                    name = %name,
                    budget_ms = self.query_timeout.as_millis() as u64,
                    "Lookup exceeded query budget"
                );
                LookupOutcome::Defer
            }
        }
    }

    async fn defer<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: &mut R,
        name: &str,
        query_type: HickoryRecordType,
    ) -> ResponseInfo {
        let Some(forwarder) = &self.forwarder else {
            return send_error_response(request, response_handle, ResponseCode::ServFail).await;
        };

        let upstream = match forwarder.forward(name, query_type).await {
            Ok(message) => message,
            Err(e) => {
                warn!(name = %name, upstream = %forwarder.peer(), error = %e, "Forwarding failed");
                return send_error_response(request, response_handle, ResponseCode::ServFail)
                    .await;
            }
        };

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = *request.header();
        header.set_response_code(upstream.response_code());
        header.set_recursion_available(true);
        let response = builder.build(
            header,
            upstream.answers().iter(),
            upstream.name_servers().iter(),
            &[],
            upstream.additionals().iter(),
        );

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send forwarded response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = &request_info.query;
        let name = query.name().to_utf8();
        let query_type = query.query_type();

        debug!(
            name = %name,
            record_type = ?query_type,
            client = %request.src().ip(),
            "DNS query received"
        );

        let answer = match self.lookup(&name, query_type).await {
            LookupOutcome::Answer(answer) => answer,
            LookupOutcome::Defer => {
                return self
                    .defer(request, &mut response_handle, &name, query_type)
                    .await
            }
        };

        let records = match ptr_records(&answer) {
            Ok(records) => records,
            Err(e) => {
                warn!(name = %name, error = %e, "Cannot encode PTR answer");
                return self
                    .defer(request, &mut response_handle, &name, query_type)
                    .await;
            }
        };

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = *request.header();
        header.set_authoritative(true);
        header.set_response_code(ResponseCode::NoError);
        let response = builder.build(header, records.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

/// PTR records for `answer`.
///
/// Targets are built from raw labels: a hardware address used as a name
/// contains ':' and is not a valid hostname.
pub fn ptr_records(answer: &PtrAnswer) -> Result<Vec<Record>, ProtoError> {
    let owner = Name::from_str(&answer.zone)?;

    answer
        .targets
        .iter()
        .map(|target| {
            let labels = target
                .split('.')
                .filter(|label| !label.is_empty())
                .map(str::as_bytes);
            let target = Name::from_labels(labels)?;
            Ok::<_, ProtoError>(Record::from_rdata(
                owner.clone(),
                answer.ttl,
                RData::PTR(PTR(target)),
            ))
        })
        .collect()
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = *request.header();
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ptr_record_for_hardware_address() {
        let answer = PtrAnswer::new("4.3.2.1.in-addr.arpa.", 3600, &["aa:bb:cc:dd:ee:ff"]);

        let records = ptr_records(&answer).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name().to_utf8(), "4.3.2.1.in-addr.arpa.");
        assert_eq!(record.ttl(), 3600);
        match record.data() {
            RData::PTR(ptr) => {
                let labels: Vec<&[u8]> = ptr.0.iter().collect();
                assert_eq!(labels, vec![b"aa:bb:cc:dd:ee:ff".as_slice()]);
                assert!(ptr.0.is_fqdn());
            }
            other => panic!("expected PTR, got {:?}", other),
        }
    }

    #[test]
    fn test_ptr_record_for_hostname() {
        let answer = PtrAnswer::new("20.1.168.192.in-addr.arpa.", 60, &["printer1.lan"]);

        let records = ptr_records(&answer).unwrap();

        match records[0].data() {
            RData::PTR(ptr) => {
                assert_eq!(ptr.0.num_labels(), 2);
                assert_eq!(ptr.0.to_utf8(), "printer1.lan.");
            }
            other => panic!("expected PTR, got {:?}", other),
        }
    }
}
