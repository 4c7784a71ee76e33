//! Sled-backed chain store
//!
//! Entries live in one tree keyed by big-endian `sequence`, so sled's
//! lexicographic key order is the chain order. A sibling tree maps every
//! issued hash (current or summary) back to its sequence key, resolving
//! the dual-field lookup with a single probe.

use std::path::Path;

use tracing::{debug, info};

use sigchain_core::ChainEntry;

use crate::error::StoreError;
use crate::storage::ChainStore;

const ENTRIES_TREE: &str = "entries";
const HASHES_TREE: &str = "hashes";

/// Persistent chain store on sled
pub struct SledChainStore {
    entries: sled::Tree,
    hashes: sled::Tree,
}

impl SledChainStore {
    /// Open (or create) the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path.as_ref())
            .map_err(|e| StoreError::Storage(format!("failed to open database: {e}")))?;
        let store = Self::from_db(&db)?;
        info!("chain store opened at {:?}", path.as_ref());
        Ok(store)
    }

    /// Open an ephemeral store, used by tests
    pub fn temporary() -> Result<Self, StoreError> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| StoreError::Storage(format!("failed to open database: {e}")))?;
        Self::from_db(&db)
    }

    fn from_db(db: &sled::Db) -> Result<Self, StoreError> {
        Ok(Self {
            entries: db.open_tree(ENTRIES_TREE)?,
            hashes: db.open_tree(HASHES_TREE)?,
        })
    }

    /// Append one entry. This is the seam for the external writer and
    /// for tests; the read path never calls it.
    pub fn append(&self, entry: ChainEntry) -> Result<(), StoreError> {
        if let Some((key, _)) = self.entries.last()? {
            let last = decode_sequence(&key)?;
            if entry.sequence <= last {
                return Err(StoreError::Storage(format!(
                    "sequence {} is not after {last}",
                    entry.sequence
                )));
            }
        }
        if self.hashes.contains_key(&entry.curr_hash)? {
            return Err(StoreError::Storage(format!(
                "duplicate hash {}",
                entry.curr_hash
            )));
        }
        if let Some(summary) = &entry.summary_hash {
            if self.hashes.contains_key(summary)? {
                return Err(StoreError::Storage(format!("duplicate hash {summary}")));
            }
        }

        let key = entry.sequence.to_be_bytes();
        self.entries.insert(key, serde_json::to_vec(&entry)?)?;
        self.hashes.insert(entry.curr_hash.as_bytes(), &key[..])?;
        if let Some(summary) = &entry.summary_hash {
            self.hashes.insert(summary.as_bytes(), &key[..])?;
        }
        debug!(sequence = entry.sequence, "appended entry");
        Ok(())
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chain has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sequence_for_hash(&self, hash: &str) -> Result<u64, StoreError> {
        let key = self.hashes.get(hash.as_bytes())?.ok_or(StoreError::NotFound)?;
        decode_sequence(&key)
    }
}

fn decode_sequence(key: &[u8]) -> Result<u64, StoreError> {
    let raw: [u8; 8] = key
        .try_into()
        .map_err(|_| StoreError::Serialization("malformed sequence key".to_string()))?;
    Ok(u64::from_be_bytes(raw))
}

fn decode_entry(value: &[u8]) -> Result<ChainEntry, StoreError> {
    Ok(serde_json::from_slice(value)?)
}

impl ChainStore for SledChainStore {
    fn entry_by_hash(&self, hash: &str) -> Result<ChainEntry, StoreError> {
        let sequence = self.sequence_for_hash(hash)?;
        let value = self
            .entries
            .get(sequence.to_be_bytes())?
            .ok_or_else(|| StoreError::Storage(format!("index points at missing sequence {sequence}")))?;
        decode_entry(&value)
    }

    fn last_entry(&self) -> Result<(String, Option<String>), StoreError> {
        let (_, value) = self.entries.last()?.ok_or(StoreError::EmptyChain)?;
        let entry = decode_entry(&value)?;
        Ok((entry.curr_hash, entry.summary_hash))
    }

    fn entries_after(&self, hash: &str) -> Result<Vec<ChainEntry>, StoreError> {
        let sequence = self.sequence_for_hash(hash)?;
        let Some(next) = sequence.checked_add(1) else {
            return Ok(Vec::new());
        };
        let start = next.to_be_bytes();
        let mut results = Vec::new();
        for item in self.entries.range(start..) {
            let (_, value) = item?;
            results.push(decode_entry(&value)?);
        }
        Ok(results)
    }

    fn all_entries(&self) -> Result<Vec<ChainEntry>, StoreError> {
        let mut results = Vec::new();
        for item in self.entries.iter() {
            let (_, value) = item?;
            results.push(decode_entry(&value)?);
        }
        Ok(results)
    }
}
