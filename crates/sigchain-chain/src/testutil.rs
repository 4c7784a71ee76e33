//! Shared fixtures for the crate's unit tests

use chrono::{TimeZone, Utc};

use sigchain_core::ChainEntry;

pub(crate) fn entry(
    sequence: u64,
    curr: &str,
    prev: Option<&str>,
    summary: Option<&str>,
) -> ChainEntry {
    ChainEntry {
        sequence,
        contents: format!("contents-{sequence}"),
        prev_hash: prev.map(str::to_string),
        curr_hash: curr.to_string(),
        summary_hash: summary.map(str::to_string),
        created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(sequence as i64),
        public_key: "writer-pk".to_string(),
        signature: format!("writer-sig-{sequence}"),
    }
}

/// A hash-linked chain h1 -> h2 -> ... with a summary hash on every
/// third entry
pub(crate) fn linked_chain(count: u64) -> Vec<ChainEntry> {
    let mut entries = Vec::new();
    let mut prev: Option<String> = None;
    for sequence in 1..=count {
        let curr = format!("h{sequence}");
        let summary = (sequence % 3 == 0).then(|| format!("s{sequence}"));
        entries.push(entry(
            sequence,
            &curr,
            prev.as_deref(),
            summary.as_deref(),
        ));
        prev = Some(curr);
    }
    entries
}
