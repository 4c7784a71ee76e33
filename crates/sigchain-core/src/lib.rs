//! # Sigchain Core
//!
//! Core types for the sigchain ledger: the hash-linked chain entry,
//! the wire record shapes served to clients, and the signed response
//! envelope.
//!
//! This crate provides:
//! - Chain entry types and serialization
//! - Wire-compatible record shapes for each query kind
//! - The response envelope wrapped around every answer
//! - Common error types

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod entry;
pub mod envelope;
pub mod error;
pub mod wire;

pub use entry::ChainEntry;
pub use envelope::{Envelope, Status};
pub use error::{Error, Result};
pub use wire::{ExportRecord, LastHash, LookupRecord};

/// Protocol version reported in every response envelope
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::entry::ChainEntry;
    pub use crate::envelope::{Envelope, Status};
    pub use crate::error::{Error, Result};
    pub use crate::wire::{ExportRecord, LastHash, LookupRecord};
    pub use crate::PROTOCOL_VERSION;
}
