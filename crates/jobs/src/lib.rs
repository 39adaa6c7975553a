pub mod ethers_reload;
pub mod runner;

pub use ethers_reload::EthersReloadJob;
pub use runner::JobRunner;
