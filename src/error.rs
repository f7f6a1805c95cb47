//! Error types.

use std::collections::TryReserveError;
use thiserror::Error;

/// Failure to construct a `ChainedHashMap`.
#[derive(Error, Debug)]
pub enum CreateError {
    #[error("bucket count must be at least 1")]
    ZeroBuckets,
    #[error("failed to allocate bucket directory")]
    Allocation(#[from] TryReserveError),
}

/// Failure to install a new hash function.
///
/// Returned before anything is moved; the table keeps its previous hash
/// function and every entry stays where it was.
#[derive(Error, Debug)]
pub enum RehashError {
    #[error("failed to allocate rehash buffer")]
    Allocation(#[from] TryReserveError),
}

/// Failure while counting words from a stream.
#[derive(Error, Debug)]
pub enum WordCountError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Create(#[from] CreateError),
}
