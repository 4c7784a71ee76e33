//! Error types for chain storage and query dispatch

use thiserror::Error;

/// Store-layer error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// No entry's current or summary hash matches the supplied hash
    #[error("No record found matching this hash.")]
    NotFound,

    /// The newest entry was requested but the chain has no entries
    #[error("The chain is empty.")]
    EmptyChain,

    /// Underlying storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored entry could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Dispatch-layer error types. Every variant is converted into a signed
/// error envelope at the dispatch boundary; none escapes as a bare fault.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The store could not satisfy the query
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A hash-requiring method was invoked without a hash argument
    #[error("A hash argument is required for this method.")]
    MissingHash,

    /// The requested method is not part of the query whitelist
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// Result shaping failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Serialization(err.to_string())
    }
}
