//! Chain store interface and in-memory backend

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use sigchain_core::ChainEntry;

use crate::error::StoreError;

/// Read-only, consistent access to the ordered entry sequence.
///
/// Hash arguments match against either `curr_hash` or `summary_hash`;
/// both are unique across the store, so at most one entry matches. Each
/// call observes a single consistent snapshot (read committed at
/// minimum): no duplicated entries, no sequence gaps within the covered
/// range.
pub trait ChainStore: Send + Sync {
    /// Resolve a hash to its entry, or `NotFound`
    fn entry_by_hash(&self, hash: &str) -> Result<ChainEntry, StoreError>;

    /// Hash pair `(curr_hash, summary_hash)` of the newest entry, or
    /// `EmptyChain`
    fn last_entry(&self) -> Result<(String, Option<String>), StoreError>;

    /// Every entry strictly after the one `hash` resolves to, ascending
    /// by sequence. Empty when `hash` resolves to the newest entry;
    /// `NotFound` when it resolves to nothing.
    fn entries_after(&self, hash: &str) -> Result<Vec<ChainEntry>, StoreError>;

    /// Every entry, ascending by sequence
    fn all_entries(&self) -> Result<Vec<ChainEntry>, StoreError>;
}

struct Inner {
    /// Entries in ascending sequence order
    entries: Vec<ChainEntry>,
    /// Unified index: any issued hash (current or summary) to its
    /// position in `entries`
    index: HashMap<String, usize>,
}

/// In-memory chain store.
///
/// One `RwLock` read guard per query gives each call its consistent
/// snapshot.
pub struct MemoryChainStore {
    inner: RwLock<Inner>,
}

impl MemoryChainStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: Vec::new(),
                index: HashMap::new(),
            }),
        }
    }

    /// Create a store pre-loaded with `entries`, which must already be
    /// in ascending sequence order
    pub fn from_entries(entries: Vec<ChainEntry>) -> Result<Self, StoreError> {
        let store = Self::new();
        for entry in entries {
            store.append(entry)?;
        }
        Ok(store)
    }

    /// Append one entry. This is the seam for the external writer and
    /// for tests; the read path never calls it.
    pub fn append(&self, entry: ChainEntry) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if let Some(last) = inner.entries.last() {
            if entry.sequence <= last.sequence {
                return Err(StoreError::Storage(format!(
                    "sequence {} is not after {}",
                    entry.sequence, last.sequence
                )));
            }
        }
        if inner.index.contains_key(&entry.curr_hash) {
            return Err(StoreError::Storage(format!(
                "duplicate hash {}",
                entry.curr_hash
            )));
        }
        if let Some(summary) = &entry.summary_hash {
            if inner.index.contains_key(summary) {
                return Err(StoreError::Storage(format!("duplicate hash {summary}")));
            }
        }

        let position = inner.entries.len();
        inner.index.insert(entry.curr_hash.clone(), position);
        if let Some(summary) = &entry.summary_hash {
            inner.index.insert(summary.clone(), position);
        }
        debug!(sequence = entry.sequence, "appended entry");
        inner.entries.push(entry);
        Ok(())
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether the chain has no entries
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }
}

impl Default for MemoryChainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainStore for MemoryChainStore {
    fn entry_by_hash(&self, hash: &str) -> Result<ChainEntry, StoreError> {
        let inner = self.inner.read();
        let position = *inner.index.get(hash).ok_or(StoreError::NotFound)?;
        Ok(inner.entries[position].clone())
    }

    fn last_entry(&self) -> Result<(String, Option<String>), StoreError> {
        let inner = self.inner.read();
        let last = inner.entries.last().ok_or(StoreError::EmptyChain)?;
        Ok((last.curr_hash.clone(), last.summary_hash.clone()))
    }

    fn entries_after(&self, hash: &str) -> Result<Vec<ChainEntry>, StoreError> {
        let inner = self.inner.read();
        let position = *inner.index.get(hash).ok_or(StoreError::NotFound)?;
        Ok(inner.entries[position + 1..].to_vec())
    }

    fn all_entries(&self) -> Result<Vec<ChainEntry>, StoreError> {
        Ok(self.inner.read().entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{entry, linked_chain};

    #[test]
    fn test_lookup_by_either_hash() {
        let store = MemoryChainStore::new();
        store.append(entry(1, "a", None, None)).unwrap();
        store.append(entry(2, "b", Some("a"), Some("chk1"))).unwrap();

        assert_eq!(store.entry_by_hash("b").unwrap().sequence, 2);
        assert_eq!(store.entry_by_hash("chk1").unwrap().sequence, 2);
        assert!(matches!(
            store.entry_by_hash("nope"),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn test_last_entry() {
        let store = MemoryChainStore::new();
        assert!(matches!(store.last_entry(), Err(StoreError::EmptyChain)));

        store.append(entry(1, "a", None, None)).unwrap();
        store.append(entry(2, "b", Some("a"), Some("chk1"))).unwrap();
        assert_eq!(
            store.last_entry().unwrap(),
            ("b".to_string(), Some("chk1".to_string()))
        );
    }

    #[test]
    fn test_entries_after() {
        let store = MemoryChainStore::from_entries(linked_chain(4)).unwrap();
        let (tip, _) = store.last_entry().unwrap();

        let first = store.all_entries().unwrap()[0].curr_hash.clone();
        let rest = store.entries_after(&first).unwrap();
        assert_eq!(rest.len(), 3);
        assert!(rest.windows(2).all(|w| w[0].sequence < w[1].sequence));

        assert!(store.entries_after(&tip).unwrap().is_empty());
        assert!(matches!(
            store.entries_after("missing"),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn test_append_rejects_stale_sequence() {
        let store = MemoryChainStore::new();
        store.append(entry(5, "a", None, None)).unwrap();
        assert!(store.append(entry(5, "b", Some("a"), None)).is_err());
        assert!(store.append(entry(4, "c", Some("a"), None)).is_err());
    }

    #[test]
    fn test_append_rejects_duplicate_hashes() {
        let store = MemoryChainStore::new();
        store.append(entry(1, "a", None, Some("chk1"))).unwrap();
        assert!(store.append(entry(2, "a", Some("a"), None)).is_err());
        assert!(store.append(entry(2, "b", Some("a"), Some("chk1"))).is_err());
    }
}
