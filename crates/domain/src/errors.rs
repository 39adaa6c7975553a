use thiserror::Error;

/// Failures of the IP → hardware address resolution step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("No reply from {0}")]
    NoReply(String),

    #[error("Transport unavailable: {0}")]
    TransportUnavailable(String),
}

/// Failures while loading the ethers table. Neither is fatal: the previous
/// table stays in place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EthersError {
    #[error("Ethers file {path} unavailable: {reason}")]
    FileUnavailable { path: String, reason: String },

    #[error("Malformed ethers entry on line {line}: {value}")]
    MalformedEntry { line: usize, value: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReverseLookupError {
    #[error("Query type {0} is not PTR")]
    NotPtr(String),

    #[error("Not a reverse lookup name: {0}")]
    NotReverseName(String),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid hardware address: {0}")]
pub struct MacAddressParseError(pub String);

/// Failures relaying a deferred query to the upstream server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForwardError {
    #[error("Invalid query name '{0}'")]
    InvalidQuery(String),

    #[error("Timeout talking to upstream {0}")]
    Timeout(String),

    #[error("Upstream {server} failed: {reason}")]
    Transport { server: String, reason: String },

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}
