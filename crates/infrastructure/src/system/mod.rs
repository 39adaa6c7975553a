pub mod arp_client;
pub mod ethers_file;
pub mod ndisc_probe;

pub use arp_client::PnetArpClient;
pub use ethers_file::EthersFile;
pub use ndisc_probe::NdiscProbe;
