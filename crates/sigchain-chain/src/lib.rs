//! # Sigchain Chain
//!
//! Read access to the append-only, hash-linked ledger.
//!
//! ## Features
//!
//! - **Dual-key lookup**: resolve an entry by its own hash or its
//!   checkpoint summary hash
//! - **Incremental sync**: everything strictly after a known hash
//! - **Full export**: one consistent snapshot of the whole chain
//! - **Signed answers**: every result, including errors, leaves the
//!   dispatcher as a signed envelope

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod error;
pub mod query;
pub mod sled_store;
pub mod storage;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{QueryError, StoreError};
pub use query::{ChainQueryService, SignedQuery};
pub use sled_store::SledChainStore;
pub use storage::{ChainStore, MemoryChainStore};
