//! The hash-linked chain entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the append-only chain.
///
/// Entries are immutable once appended. `sequence` is the sole ordering
/// authority; `created` is informational and not guaranteed monotonic
/// across clock skew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    /// Strictly increasing position in the chain, assigned at append time
    pub sequence: u64,
    /// Opaque content supplied by the original writer
    pub contents: String,
    /// Hash of the previous entry; `None` for the genesis entry
    pub prev_hash: Option<String>,
    /// Hash binding `prev_hash`, `contents` and metadata; unique per store
    pub curr_hash: String,
    /// Periodic checkpoint hash; present only on checkpoint boundaries,
    /// unique where present
    pub summary_hash: Option<String>,
    /// Timestamp assigned at append time
    pub created: DateTime<Utc>,
    /// Identifies the original writer of `contents`
    pub public_key: String,
    /// Writer's signature over `contents`, verifiable with `public_key`
    pub signature: String,
}

impl ChainEntry {
    /// Whether this entry is the first in its chain
    pub fn is_genesis(&self) -> bool {
        self.prev_hash.is_none()
    }

    /// Whether `hash` matches this entry's current or summary hash
    pub fn matches_hash(&self, hash: &str) -> bool {
        self.curr_hash == hash || self.summary_hash.as_deref() == Some(hash)
    }
}
