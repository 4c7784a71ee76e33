//! The signed response envelope
//!
//! Every answer the ledger produces, success or error, is wrapped in an
//! `Envelope` before signing. The envelope has no persisted identity; it
//! is built fresh per request and owned by the response path.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::PROTOCOL_VERSION;

/// Envelope status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The query succeeded
    #[serde(rename = "OK")]
    Ok,
    /// The query failed; `results` carries a human-readable message
    #[serde(rename = "ERROR")]
    Error,
}

/// The versioned, timestamped wrapper around every query result.
///
/// Field order is fixed by the struct declaration, so serializing the
/// same envelope always yields the same bytes. The signature produced by
/// the response signer covers exactly those bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Protocol version
    pub version: String,
    /// Envelope construction time, ISO-8601
    pub datetime: String,
    /// Success or error indicator
    pub status: Status,
    /// Query-shaped payload, or an error message
    pub results: serde_json::Value,
}

impl Envelope {
    /// Build an envelope around `results` with the current timestamp
    pub fn new(status: Status, results: serde_json::Value) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            datetime: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            status,
            results,
        }
    }

    /// Serialize to the canonical byte form that gets signed
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse an envelope back from its canonical bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
