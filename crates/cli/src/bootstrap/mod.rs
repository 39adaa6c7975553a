mod config;
mod ethers;
mod logging;

pub use config::load_config;
pub use ethers::load_ethers;
pub use logging::init_logging;
