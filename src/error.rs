//! Error types for the mmdict crate.

use std::io;

use thiserror::Error;

/// The error type for store construction, generation, and load.
///
/// Queries (`exists`, the length counts) are total functions over a mapped
/// store and have no error cases.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O failure on the backing file or the word-list source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Resizing the backing file to the store length failed.
    #[error("failed to resize backing file to {expected} bytes: {source}")]
    Size {
        expected: u64,
        #[source]
        source: io::Error,
    },

    /// Establishing the memory mapping failed.
    #[error("failed to establish memory mapping: {0}")]
    Map(#[source] io::Error),

    /// A record index at or beyond the store capacity.
    #[error("record index {index} out of range (capacity {capacity})")]
    IndexOutOfRange { index: u64, capacity: u64 },

    /// The word-list source holds more lines than the store has slots.
    #[error("word list exceeds store capacity of {capacity} slots")]
    CapacityExceeded { capacity: u64 },

    /// A source line is longer than a record can hold.
    #[error("word of {len} bytes does not fit in a record ({max}-byte limit)")]
    WordTooLong { len: usize, max: usize },

    /// The backing file is not a valid store for the requested capacity.
    #[error("corrupt store: {0}")]
    CorruptStore(String),
}

/// A convenience `Result` alias using [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
