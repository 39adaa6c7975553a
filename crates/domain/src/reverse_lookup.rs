use super::RecordType;
use std::sync::Arc;

/// Incoming reverse-DNS question.
#[derive(Debug, Clone)]
pub struct ReverseQuery {
    /// Question name as received, e.g. `4.3.2.1.in-addr.arpa.`
    pub name: Arc<str>,
    pub record_type: RecordType,
}

impl ReverseQuery {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }
}

/// PTR record set produced for a [`ReverseQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtrAnswer {
    pub zone: Arc<str>,
    pub ttl: u32,
    pub targets: Vec<String>,
}

impl PtrAnswer {
    pub fn new(zone: impl Into<Arc<str>>, ttl: u32, names: &[&str]) -> Self {
        Self {
            zone: zone.into(),
            ttl,
            targets: names.iter().map(|n| fqdn(n)).collect(),
        }
    }
}

/// What the reverse lookup decided to do with a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Answer(PtrAnswer),
    /// Not handled here; the next handler in the chain gets the query.
    Defer,
}

impl LookupOutcome {
    pub fn is_defer(&self) -> bool {
        matches!(self, LookupOutcome::Defer)
    }

    pub fn answer(&self) -> Option<&PtrAnswer> {
        match self {
            LookupOutcome::Answer(answer) => Some(answer),
            LookupOutcome::Defer => None,
        }
    }
}

/// Appends the root label if `name` does not already end with one.
pub fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}
