use arpdns_application::services::NeighborAddressResolver;
use arpdns_application::use_cases::ReverseLookupUseCase;
use arpdns_domain::{Config, ResolutionError};
use arpdns_infrastructure::dns::{DnsServerHandler, UpstreamForwarder};
use arpdns_infrastructure::system::{EthersFile, NdiscProbe, PnetArpClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct Services {
    pub table: Arc<EthersFile>,
    pub use_case: Arc<ReverseLookupUseCase>,
    pub forwarder: Option<Arc<UpstreamForwarder>>,
    query_timeout: Duration,
}

impl Services {
    /// Fails only when the ARP transport cannot be bound.
    pub fn new(config: &Config) -> Result<Self, ResolutionError> {
        let neighbor = &config.neighbor;

        let arp = Arc::new(PnetArpClient::bind(&neighbor.interface)?);
        let probe = Arc::new(NdiscProbe::new(
            neighbor.probe_command.clone(),
            Duration::from_millis(neighbor.probe_timeout_ms),
        ));
        let resolver = Arc::new(
            NeighborAddressResolver::new(arp, probe, neighbor.interface.clone())
                .with_arp_deadline(Duration::from_millis(neighbor.arp_timeout_ms))
                .with_own_address_resolution(neighbor.resolve_own_address),
        );

        let table = Arc::new(EthersFile::new(&config.ethers.path));
        info!(path = %table.path().display(), ttl = config.ethers.ttl, "Using ethers file");

        let use_case = Arc::new(
            ReverseLookupUseCase::new(resolver, table.clone()).with_ttl(config.ethers.ttl),
        );

        let forwarder = config.upstream.primary().map(|server| {
            info!(upstream = %server, "Deferred queries are forwarded");
            Arc::new(UpstreamForwarder::udp(
                server,
                Duration::from_millis(config.upstream.timeout_ms),
            ))
        });

        Ok(Self {
            table,
            use_case,
            forwarder,
            query_timeout: Duration::from_millis(config.server.query_timeout_ms),
        })
    }

    pub fn dns_handler(&self) -> DnsServerHandler {
        let handler = DnsServerHandler::new(self.use_case.clone())
            .with_query_timeout(self.query_timeout);

        match &self.forwarder {
            Some(forwarder) => handler.with_forwarder(forwarder.clone()),
            None => handler,
        }
    }
}
