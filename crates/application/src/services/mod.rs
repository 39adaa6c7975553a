mod neighbor_address_resolver;

pub use neighbor_address_resolver::NeighborAddressResolver;
