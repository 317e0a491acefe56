//! Symmetric pair hashing.
//!
//! The cache key for a pairwise analysis is a deterministic function of the
//! two user ids: sort ascending, join with a separator, SHA-256, hex digest.
//! Same digest regardless of argument order, stable across restarts.

use sha2::{Digest, Sha256};

/// Derive the symmetric pair hash for two user ids.
///
/// Callers must reject self-pairs before hashing; this function assumes the
/// ids are distinct.
pub fn pair_hash(user_x: u64, user_y: u64) -> String {
    let (lo, hi) = if user_x <= user_y {
        (user_x, user_y)
    } else {
        (user_y, user_x)
    };

    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}", lo, hi).as_bytes());
    hex::encode(hasher.finalize())
}

/// Sort a pair of user ids ascending, matching the stored order in
/// [`crate::types::MatchResult`].
pub fn ordered_pair(user_x: u64, user_y: u64) -> (u64, u64) {
    if user_x <= user_y {
        (user_x, user_y)
    } else {
        (user_y, user_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_symmetric() {
        assert_eq!(pair_hash(1, 2), pair_hash(2, 1));
        assert_eq!(pair_hash(42, 7), pair_hash(7, 42));
    }

    #[test]
    fn test_hash_is_stable_hex_digest() {
        let digest = pair_hash(1, 2);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        // pure function of the ids, no per-process randomness
        assert_eq!(digest, pair_hash(1, 2));
    }

    #[test]
    fn test_distinct_pairs_distinct_hashes() {
        assert_ne!(pair_hash(1, 2), pair_hash(1, 3));
        assert_ne!(pair_hash(1, 2), pair_hash(2, 3));
        // separator prevents ambiguous concatenation (1,23) vs (12,3)
        assert_ne!(pair_hash(1, 23), pair_hash(12, 3));
    }

    #[test]
    fn test_ordered_pair() {
        assert_eq!(ordered_pair(5, 3), (3, 5));
        assert_eq!(ordered_pair(3, 5), (3, 5));
    }
}
