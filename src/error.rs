use thiserror::Error;

/// Failure kinds surfaced by the pool data service.
///
/// Absence of data (unknown pool, empty result set) is not an error; it is
/// modeled as `None` or an empty collection in the response types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A required endpoint or key is missing from the configuration.
    /// Raised on first use of the affected component, not at load time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The RPC endpoint is unreachable or a contract read failed.
    #[error("connectivity error: {0}")]
    Connectivity(String),

    /// The subgraph request failed at the HTTP level (`status` set) or was
    /// rejected at the GraphQL level (`status` unset, first reported message).
    #[error("subgraph request failed: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Malformed input, e.g. a string that is not an Ethereum address.
    #[error("invalid input: {0}")]
    Validation(String),
}
