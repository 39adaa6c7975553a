//! Mapping from `hickory_proto::rr::RecordType` to `arpdns_domain::RecordType`

use arpdns_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        match hickory_type {
            HickoryRecordType::PTR => RecordType::PTR,
            other => RecordType::Other(u16::from(other)),
        }
    }
}
