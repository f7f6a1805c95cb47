//! Bucket hash functions.
//!
//! A hash function maps a key to an unsigned integer; the table reduces it
//! modulo its bucket count. Plain `fn` pointers are used so a table can swap
//! its function at runtime without changing type.

/// Signature of a key hash function.
pub type HashFn = fn(&str) -> u64;

/// Additive byte sum over the key.
///
/// Deliberately weak: any permutation of the same bytes hashes equally, so
/// `"key"` and `"yek"` always share a bucket.
pub fn byte_sum(key: &str) -> u64 {
    key.bytes().fold(0u64, |acc, b| acc.wrapping_add(u64::from(b)))
}

/// `byte_sum` shifted by one. Moves every key to the neighbouring bucket,
/// which makes it handy for exercising a rehash.
pub fn byte_sum_plus_one(key: &str) -> u64 {
    byte_sum(key).wrapping_add(1)
}
