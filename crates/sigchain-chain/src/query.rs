//! Signed query dispatch
//!
//! Maps a requested method to a store operation, shapes the result for
//! the wire and hands it to the response signer. This is the single
//! catch-and-convert point: every recoverable failure leaves here as a
//! signed error envelope, so the caller never sees a bare fault.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use sigchain_core::{ExportRecord, LastHash, LookupRecord, Status};
use sigchain_crypto::{CryptoError, ResponseSigner, SignedResponse};

use crate::error::QueryError;
use crate::storage::ChainStore;

/// Method whitelist
const METHOD_EXPORT: &str = "export";
const METHOD_LASTHASH: &str = "lasthash";
const METHOD_HASH: &str = "hash";
const METHOD_SINCE: &str = "since";

/// A dispatch outcome: the signed envelope to return, plus the failure
/// that produced it when the envelope carries an error status. The
/// transport layer uses the failure kind to pick an HTTP status without
/// re-parsing the signed body.
pub struct SignedQuery {
    /// The envelope and its signature, success or error
    pub signed: SignedResponse,
    /// The converted failure, when there was one
    pub failure: Option<QueryError>,
}

/// Dispatches query methods against an injected store and signer.
///
/// Stateless between requests; every query is an independent read-only
/// pass over the store.
pub struct ChainQueryService {
    store: Arc<dyn ChainStore>,
    signer: ResponseSigner,
}

impl ChainQueryService {
    /// Create a dispatcher over `store`, signing with `signer`
    pub fn new(store: Arc<dyn ChainStore>, signer: ResponseSigner) -> Self {
        Self { store, signer }
    }

    /// Public key clients verify responses against, lowercase hex
    pub fn public_key_hex(&self) -> String {
        self.signer.public_key_hex()
    }

    /// Run `method`, producing a signed envelope either way.
    ///
    /// The only error that can escape unsigned is a signing failure,
    /// which is fatal by definition: without the key no response at all
    /// can be produced.
    pub fn dispatch(&self, method: &str, hash: Option<&str>) -> Result<SignedQuery, CryptoError> {
        match self.run(method, hash) {
            Ok(results) => {
                debug!(method, "query succeeded");
                Ok(SignedQuery {
                    signed: self.signer.sign(Status::Ok, results)?,
                    failure: None,
                })
            }
            Err(err) => {
                warn!(method, error = %err, "query failed");
                Ok(SignedQuery {
                    signed: self.signer.sign(Status::Error, Value::String(err.to_string()))?,
                    failure: Some(err),
                })
            }
        }
    }

    fn run(&self, method: &str, hash: Option<&str>) -> Result<Value, QueryError> {
        match method {
            METHOD_EXPORT => {
                let records: Vec<ExportRecord> = self
                    .store
                    .all_entries()?
                    .iter()
                    .map(ExportRecord::from)
                    .collect();
                Ok(serde_json::to_value(records)?)
            }
            METHOD_LASTHASH => {
                let (current_hash, summary_hash) = self.store.last_entry()?;
                Ok(serde_json::to_value(LastHash {
                    current_hash,
                    summary_hash,
                })?)
            }
            METHOD_HASH => {
                let hash = require_hash(hash)?;
                let record = LookupRecord::from(&self.store.entry_by_hash(hash)?);
                Ok(serde_json::to_value(record)?)
            }
            METHOD_SINCE => {
                let hash = require_hash(hash)?;
                let records: Vec<LookupRecord> = self
                    .store
                    .entries_after(hash)?
                    .iter()
                    .map(LookupRecord::from)
                    .collect();
                Ok(serde_json::to_value(records)?)
            }
            other => Err(QueryError::UnknownMethod(other.to_string())),
        }
    }
}

/// Reject a missing or empty hash argument before any store access
fn require_hash(hash: Option<&str>) -> Result<&str, QueryError> {
    match hash {
        Some(h) if !h.is_empty() => Ok(h),
        _ => Err(QueryError::MissingHash),
    }
}
