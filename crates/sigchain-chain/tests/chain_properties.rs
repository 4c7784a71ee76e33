//! Property tests over generated valid chains
//!
//! Chains are built with the real entry hash derivation, then queried
//! through both store backends.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use sigchain_chain::{ChainStore, MemoryChainStore, SledChainStore};
use sigchain_core::ChainEntry;
use sigchain_crypto::{compute_entry_hash, verify_linkage};

/// Build a hash-linked chain from writer contents, assigning a summary
/// hash every `checkpoint_every` entries (0 disables checkpoints)
fn build_chain(contents: &[String], checkpoint_every: u64) -> Vec<ChainEntry> {
    let mut entries = Vec::with_capacity(contents.len());
    let mut prev: Option<String> = None;
    for (i, contents) in contents.iter().enumerate() {
        let sequence = i as u64 + 1;
        let curr_hash = compute_entry_hash(prev.as_deref(), sequence, contents, "pk", "sig");
        let summary_hash = (checkpoint_every > 0 && sequence % checkpoint_every == 0)
            .then(|| format!("summary-{curr_hash}"));
        entries.push(ChainEntry {
            sequence,
            contents: contents.clone(),
            prev_hash: prev.clone(),
            curr_hash: curr_hash.clone(),
            summary_hash,
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::seconds(sequence as i64),
            public_key: "pk".to_string(),
            signature: "sig".to_string(),
        });
        prev = Some(curr_hash);
    }
    entries
}

fn contents_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(".{0,32}", 1..25)
}

proptest! {
    #[test]
    fn prop_built_chains_satisfy_linkage(contents in contents_strategy(), every in 0u64..5) {
        let entries = build_chain(&contents, every);
        prop_assert!(verify_linkage(&entries).is_ok());
    }

    #[test]
    fn prop_entries_after_is_strict_suffix(contents in contents_strategy(), every in 0u64..5) {
        let entries = build_chain(&contents, every);
        let store = MemoryChainStore::from_entries(entries.clone()).unwrap();

        for (i, anchor) in entries.iter().enumerate() {
            let after = store.entries_after(&anchor.curr_hash).unwrap();
            prop_assert_eq!(after.len(), entries.len() - i - 1);
            prop_assert!(after.iter().all(|e| e.sequence > anchor.sequence));
            prop_assert!(after.windows(2).all(|w| w[0].sequence < w[1].sequence));
            // Empty exactly when the anchor is the newest entry
            prop_assert_eq!(after.is_empty(), i == entries.len() - 1);

            // The summary hash resolves to the same anchor
            if let Some(summary) = &anchor.summary_hash {
                let via_summary = store.entries_after(summary).unwrap();
                prop_assert_eq!(&after, &via_summary);
            }
        }
    }

    #[test]
    fn prop_all_entries_matches_per_hash_lookup(contents in contents_strategy(), every in 0u64..5) {
        let entries = build_chain(&contents, every);
        let store = MemoryChainStore::from_entries(entries.clone()).unwrap();

        let all = store.all_entries().unwrap();
        prop_assert_eq!(all.len(), entries.len());

        // Concatenating per-hash lookups over every known hash
        // reproduces the full scan
        let looked_up: Vec<ChainEntry> = all
            .iter()
            .map(|e| store.entry_by_hash(&e.curr_hash).unwrap())
            .collect();
        prop_assert_eq!(&all, &looked_up);
    }

    #[test]
    fn prop_backends_agree(contents in contents_strategy(), every in 0u64..5) {
        let entries = build_chain(&contents, every);
        let memory = MemoryChainStore::from_entries(entries.clone()).unwrap();
        let sled = SledChainStore::temporary().unwrap();
        for entry in &entries {
            sled.append(entry.clone()).unwrap();
        }

        prop_assert_eq!(memory.all_entries().unwrap(), sled.all_entries().unwrap());
        prop_assert_eq!(memory.last_entry().unwrap(), sled.last_entry().unwrap());
        for entry in &entries {
            prop_assert_eq!(
                memory.entry_by_hash(&entry.curr_hash).unwrap(),
                sled.entry_by_hash(&entry.curr_hash).unwrap()
            );
            prop_assert_eq!(
                memory.entries_after(&entry.curr_hash).unwrap(),
                sled.entries_after(&entry.curr_hash).unwrap()
            );
        }
    }
}
