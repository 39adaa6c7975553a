pub mod message_builder;
pub mod record_type_map;
pub mod upstream;

pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
pub use upstream::UpstreamForwarder;
