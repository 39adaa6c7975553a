//! arpdns infrastructure: system adapters and the DNS request handler
pub mod dns;
pub mod system;
