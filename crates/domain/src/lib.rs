//! arpdns domain layer
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod hardware_address;
pub mod reverse_lookup;
pub mod reverse_name;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::RecordType;
pub use errors::{
    EthersError, ForwardError, MacAddressParseError, ResolutionError, ReverseLookupError,
};
pub use hardware_address::MacAddress;
pub use reverse_lookup::{LookupOutcome, PtrAnswer, ReverseQuery};
