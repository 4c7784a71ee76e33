//! Wire-compatible record shapes
//!
//! The ledger serves the same underlying entry under two different field
//! namings: the `export` shape (`prev`, `hash`, `summary`) and the
//! `hash`/`since` shape (`prevhash`, `currhash`, `summaryhash`). Both are
//! reproduced exactly for client compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::ChainEntry;

/// Record shape returned by the `export` query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Writer-supplied content
    pub contents: String,
    /// Previous entry hash
    pub prev: Option<String>,
    /// This entry's hash
    pub hash: String,
    /// Checkpoint hash, if assigned
    pub summary: Option<String>,
    /// Append timestamp
    pub created: DateTime<Utc>,
    /// Writer's public key
    pub publickey: String,
    /// Writer's signature over `contents`
    pub signature: String,
}

/// Record shape returned by the `hash` and `since` queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    /// Writer-supplied content
    pub contents: String,
    /// Previous entry hash
    pub prevhash: Option<String>,
    /// This entry's hash
    pub currhash: String,
    /// Checkpoint hash, if assigned
    pub summaryhash: Option<String>,
    /// Append timestamp
    pub created: DateTime<Utc>,
    /// Writer's public key
    pub publickey: String,
    /// Writer's signature over `contents`
    pub signature: String,
}

/// Hash pair of the newest entry, returned by the `lasthash` query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastHash {
    /// Current hash of the newest entry
    #[serde(rename = "current-hash")]
    pub current_hash: String,
    /// Summary hash of the newest entry, if assigned
    #[serde(rename = "summary-hash")]
    pub summary_hash: Option<String>,
}

impl From<&ChainEntry> for ExportRecord {
    fn from(entry: &ChainEntry) -> Self {
        Self {
            contents: entry.contents.clone(),
            prev: entry.prev_hash.clone(),
            hash: entry.curr_hash.clone(),
            summary: entry.summary_hash.clone(),
            created: entry.created,
            publickey: entry.public_key.clone(),
            signature: entry.signature.clone(),
        }
    }
}

impl From<&ChainEntry> for LookupRecord {
    fn from(entry: &ChainEntry) -> Self {
        Self {
            contents: entry.contents.clone(),
            prevhash: entry.prev_hash.clone(),
            currhash: entry.curr_hash.clone(),
            summaryhash: entry.summary_hash.clone(),
            created: entry.created,
            publickey: entry.public_key.clone(),
            signature: entry.signature.clone(),
        }
    }
}
