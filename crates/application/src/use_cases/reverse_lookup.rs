use crate::ports::{AddressResolver, StaticHostTable};
use arpdns_domain::reverse_name::extract_address;
use arpdns_domain::{
    EthersError, LookupOutcome, MacAddress, PtrAnswer, RecordType, ReverseLookupError, ReverseQuery,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_PTR_TTL: u32 = 3600;

/// Answers PTR queries with the hostname (or MAC) of the neighbor owning the
/// queried address.
pub struct ReverseLookupUseCase {
    resolver: Arc<dyn AddressResolver>,
    table: Arc<dyn StaticHostTable>,
    ttl: u32,
}

impl ReverseLookupUseCase {
    pub fn new(resolver: Arc<dyn AddressResolver>, table: Arc<dyn StaticHostTable>) -> Self {
        Self {
            resolver,
            table,
            ttl: DEFAULT_PTR_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Every failure becomes [`LookupOutcome::Defer`]: this handler declines
    /// rather than turning a neighbor miss into a DNS error.
    pub async fn execute(&self, query: &ReverseQuery) -> LookupOutcome {
        match self.answer(query).await {
            Ok(answer) => LookupOutcome::Answer(answer),
            Err(e) => {
                debug!(name = %query.name, reason = %e, "Deferring query");
                LookupOutcome::Defer
            }
        }
    }

    pub async fn answer(&self, query: &ReverseQuery) -> Result<PtrAnswer, ReverseLookupError> {
        if query.record_type != RecordType::PTR {
            return Err(ReverseLookupError::NotPtr(query.record_type.to_string()));
        }

        let ip = extract_address(&query.name)
            .ok_or_else(|| ReverseLookupError::NotReverseName(query.name.to_string()))?;
        debug!(ip = %ip, "PTR lookup");

        let resolved = self.resolver.resolve(&ip.to_string()).await?;
        let hardware_address = MacAddress::canonicalize(&resolved).unwrap_or(resolved);

        match self.table.refresh_if_stale().await {
            Ok(_) => {}
            Err(e @ EthersError::FileUnavailable { .. }) => {
                debug!(error = %e, "Ethers table not refreshed");
            }
            Err(e) => warn!(error = %e, "Ethers table not refreshed"),
        }

        let hostnames = self.table.lookup(&hardware_address);
        let name = hostnames
            .first()
            .map(String::as_str)
            .unwrap_or(&hardware_address);

        debug!(ip = %ip, mac = %hardware_address, name = %name, "PTR answer");

        Ok(PtrAnswer::new(Arc::clone(&query.name), self.ttl, &[name]))
    }
}
