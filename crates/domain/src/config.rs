pub mod errors;
pub mod ethers;
pub mod logging;
pub mod neighbor;
pub mod root;
pub mod server;
pub mod upstream;

pub use errors::ConfigError;
pub use ethers::EthersConfig;
pub use logging::LoggingConfig;
pub use neighbor::NeighborConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
