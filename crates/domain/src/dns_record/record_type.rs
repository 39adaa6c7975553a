use std::fmt;

/// Question type as seen by the reverse-lookup path: PTR is answered, every
/// other type keeps its wire code and is deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    PTR,
    Other(u16),
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::PTR => f.write_str("PTR"),
            // RFC 3597 generic form
            RecordType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}
