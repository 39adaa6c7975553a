use arpdns_domain::ResolutionError;
use async_trait::async_trait;

#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolves an IP literal to the hardware address that owns it on the
    /// local segment.
    async fn resolve(&self, target: &str) -> Result<String, ResolutionError>;
}
