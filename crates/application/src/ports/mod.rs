mod address_resolver;
mod arp_client;
mod neighbor_probe;
mod static_host_table;

pub use address_resolver::AddressResolver;
pub use arp_client::{ArpClient, InterfaceBinding};
pub use neighbor_probe::NeighborProbe;
pub use static_host_table::{RefreshOutcome, StaticHostTable};
