//! Entry hash derivation and chain-linkage verification
//!
//! Each entry's hash binds the previous entry's hash, the entry content
//! and its metadata, so altering any entry invalidates its own hash and
//! the linkage of every later entry.

use sha2::{Digest, Sha256};

use sigchain_core::ChainEntry;

use crate::error::{CryptoError, Result};

/// Domain separator for entry hashes
const ENTRY_DOMAIN: &[u8] = b"sigchain.entry.v1";

/// Compute the hash of an entry from its predecessor and content.
///
/// `prev_hash` is `None` for the genesis entry. The result is lowercase
/// hex, the form stored in `ChainEntry::curr_hash`.
pub fn compute_entry_hash(
    prev_hash: Option<&str>,
    sequence: u64,
    contents: &str,
    public_key: &str,
    signature: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ENTRY_DOMAIN);
    hasher.update(prev_hash.unwrap_or("").as_bytes());
    hasher.update(sequence.to_be_bytes());
    hasher.update(contents.as_bytes());
    hasher.update(public_key.as_bytes());
    hasher.update(signature.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify the hash linkage of an ordered slice of entries.
///
/// Checks that `sequence` strictly increases and that every entry after
/// the first carries its predecessor's `curr_hash` in `prev_hash`. The
/// slice may be any contiguous run of the chain, so the first entry's
/// own `prev_hash` is not inspected.
pub fn verify_linkage(entries: &[ChainEntry]) -> Result<()> {
    for pair in entries.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.sequence <= prev.sequence {
            return Err(CryptoError::InvalidChain(format!(
                "Sequence not increasing at {}",
                curr.sequence
            )));
        }
        if curr.prev_hash.as_deref() != Some(prev.curr_hash.as_str()) {
            return Err(CryptoError::InvalidChain(format!(
                "Broken linkage at sequence {}",
                curr.sequence
            )));
        }
    }
    Ok(())
}
