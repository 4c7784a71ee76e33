//! # Sigchain Cryptographic Library
//!
//! Cryptographic primitives for the sigchain ledger.
//!
//! ## Core Components
//!
//! - [`chain`]: entry hash derivation and chain-linkage verification
//! - [`identity`]: Ed25519 service identity (signing key management)
//! - [`signer`]: signed response envelopes and offline verification

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod chain;
pub mod error;
pub mod identity;
pub mod signer;

pub use chain::{compute_entry_hash, verify_linkage};
pub use error::{CryptoError, Result};
pub use identity::{verifying_key_from_hex, SigningIdentity};
pub use signer::{verify_response, ResponseSigner, SignedResponse};
