//! arpdns application layer: ports and orchestration
pub mod ports;
pub mod services;
pub mod use_cases;
