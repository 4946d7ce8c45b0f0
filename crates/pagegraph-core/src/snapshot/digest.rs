//! Digest computation for snapshots.
//!
//! A snapshot serializes to canonical JSON (every map in it is ordered), so
//! hashing that JSON gives a stable identity: two replays of the same log
//! produce the same digest, and a checkpoint can be checked against a
//! rebuild.

use crate::errors::Result;
use crate::snapshot::Snapshot;
use sha2::{Digest, Sha256};

/// Compute the digest of a snapshot.
///
/// ## Returns
///
/// Hex-encoded SHA256 digest (64 characters)
///
/// ## Errors
///
/// Returns `PageGraphError::Serialization` if JSON serialization fails.
///
/// ## Example
///
/// ```
/// use pagegraph_core::snapshot::{digest::compute_snapshot_digest, Snapshot};
///
/// let digest = compute_snapshot_digest(&Snapshot::new()).unwrap();
/// assert_eq!(digest.len(), 64);
/// ```
pub fn compute_snapshot_digest(snapshot: &Snapshot) -> Result<String> {
    let canonical = serde_json::to_string(snapshot)?;
    Ok(hash_string(&canonical))
}

/// Compute the digest of the tree alone (entities and root order).
///
/// Useful when a caller only cares whether rendering input changed.
///
/// ## Errors
///
/// Returns `PageGraphError::Serialization` if JSON serialization fails.
pub fn compute_tree_digest(snapshot: &Snapshot) -> Result<String> {
    let canonical = serde_json::to_string(&(snapshot.root_children(), snapshot.entities()))?;
    Ok(hash_string(&canonical))
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_string_deterministic() {
        let hash1 = hash_string("test");
        let hash2 = hash_string("test");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_empty_snapshot_digest_is_stable() {
        let a = compute_snapshot_digest(&Snapshot::new()).unwrap();
        let b = compute_snapshot_digest(&Snapshot::new()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, compute_tree_digest(&Snapshot::new()).unwrap());
    }
}
