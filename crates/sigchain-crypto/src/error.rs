//! Error types for sigchain crypto

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Crypto error types
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The signing key could not be loaded or stored. Fatal at startup:
    /// no response, success or error, can be produced without the key.
    #[error("Signing key unavailable: {0}")]
    KeyUnavailable(String),

    /// A public key could not be parsed
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Signature verification failed
    #[error("Invalid signature")]
    InvalidSignature,

    /// The chain linkage does not hold
    #[error("Invalid chain: {0}")]
    InvalidChain(String),

    /// Envelope serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        CryptoError::Serialization(err.to_string())
    }
}

impl From<sigchain_core::Error> for CryptoError {
    fn from(err: sigchain_core::Error) -> Self {
        CryptoError::Serialization(err.to_string())
    }
}
