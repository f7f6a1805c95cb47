//! chained-hashmap: a single-threaded hash table with a fixed number of
//! buckets, separate chaining, caller-defined collision resolution and a
//! hash function that can be swapped while the table holds entries.
//!
//! Internal Design:
//!
//! Summary
//! - Directory: `Vec<Option<DefaultKey>>`, one chain head per bucket. An
//!   empty bucket is `None`; there are no sentinel nodes.
//! - Chains: singly linked nodes stored in a `slotmap::SlotMap` arena. Each
//!   node owns a `Box<str>` copy of its key, its value, and the generational
//!   key of its successor.
//! - Hashing: a plain `fn(&str) -> u64`; bucket = `hash % num_buckets`. The
//!   default is an additive byte sum (see `hash`).
//!
//! Constraints
//! - Bucket count is fixed at construction (minimum 1); no growth policy.
//! - At most one entry per distinct key. Inserting an existing key never
//!   changes `len()`.
//! - Every entry lives in the chain at `bucket_index(key)` under the active
//!   hash function, including right after `set_hash_function` returns.
//! - Chain order is append order, except where removal or rehash relinks.
//!
//! Ownership
//! - Keys are copied on insert; callers may reuse their buffers freely.
//! - Values are owned by the table. Removal hands them back (`remove`) or
//!   to a callback (`remove_with`); teardown drops them (`Drop`) or hands
//!   them to a callback (`destroy`, which consumes the table).
//! - Collision resolvers receive both values by move and return the one to
//!   keep.
//!
//! Rehashing
//! - `set_hash_function` drains all entries into a separate buffer, then
//!   relinks them under the new function. Reading and rewriting the same
//!   chains at once could skip or duplicate entries; the buffer avoids it.
//! - Buffers are reserved before anything moves, so an allocation failure
//!   leaves the table untouched.
//!
//! Notes and non-goals
//! - Not thread-safe; callers serialise access. Iteration borrows the table,
//!   so mutation while iterating does not compile.
//! - Iteration order follows buckets and chains and must not be relied on.
//! - `word_count` is a consumer of the public surface, not part of the core.

pub mod chained_hash_map;
mod chained_hash_map_proptest;
pub mod error;
pub mod hash;
pub mod resolve;
pub mod word_count;

// Public surface
pub use chained_hash_map::{ChainedHashMap, Insertion};
pub use error::{CreateError, RehashError, WordCountError};
pub use hash::{byte_sum, byte_sum_plus_one, HashFn};
