//! Ready-made collision resolvers for `ChainedHashMap::insert_with_resolver`.
//!
//! A resolver receives `(old, new)` when a key is inserted again and returns
//! the value to keep. Whatever it does not return is dropped by the resolver.

use core::ops::Add;

/// Keep the value already stored; the incoming one is discarded.
pub fn keep_old<V>(old: V, _new: V) -> V {
    old
}

/// Replace the stored value with the incoming one.
pub fn keep_new<V>(_old: V, new: V) -> V {
    new
}

/// Merge by addition. Used for occurrence counting.
pub fn sum<V: Add<Output = V>>(old: V, new: V) -> V {
    old + new
}
