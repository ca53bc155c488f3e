//! Integer hashing for open-addressed node tables

use crate::NodeId;

/// Thomas Wang's 64-bit integer mix
///
/// Consecutive node identifiers land far apart, so masking the result to a
/// power-of-two table size gives usable bucket indexes.
#[inline]
pub const fn wang_hash_64(key: NodeId) -> u64 {
    let mut key = (!key).wrapping_add(key << 21);
    key ^= key >> 24;
    key = key.wrapping_add(key << 3).wrapping_add(key << 8);
    key ^= key >> 14;
    key = key.wrapping_add(key << 2).wrapping_add(key << 4);
    key ^= key >> 28;
    key.wrapping_add(key << 31)
}

/// Bucket for `node` in a table of `capacity` slots
///
/// `capacity` must be a power of two.
#[inline]
pub const fn bucket(node: NodeId, capacity: usize) -> usize {
    (wang_hash_64(node) as usize) & (capacity - 1)
}
