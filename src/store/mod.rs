//! # Store Module
//!
//! This module provides the on-disk format and mapping lifecycle for mmdict:
//! a flat file of fixed-size word records behind a 64-byte header, accessed
//! through a read/write memory mapping.
//!
//! ## File Format
//!
//! ```text
//! +------------------------+
//! |  Header (64 bytes)     |  <- magic, version, capacity, populated count
//! +------------------------+
//! |  Record 0 (108 bytes)  |
//! +------------------------+
//! |  Record 1 (108 bytes)  |
//! +------------------------+
//! |  ...                   |
//! +------------------------+
//! |  Record C-1            |  <- C = capacity, fixed at creation
//! +------------------------+
//! ```
//!
//! The file length is always exactly `FILE_HEADER_SIZE + capacity *
//! RECORD_SIZE` while a store is mapped. Capacity is authoritative: it is
//! chosen at creation and never re-derived from the file length. Slots past
//! the populated count are zero-filled.
//!
//! ## Safety Model
//!
//! A memory-mapped region becomes invalid once it is unmapped. Rather than
//! tracking that at runtime, the mapping is owned by [`RecordStore`] and all
//! record views borrow the store:
//!
//! ```text
//! RecordStore::record_at(&self) -> &Record   // Borrows &self immutably
//! RecordStore::close(self)                   // Consumes the store
//! ```
//!
//! The borrow checker rules out views that outlive the mapping and a second
//! close of the same store, with no runtime cost.
//!
//! ## Module Organization
//!
//! - `header`: 64-byte file header (`StoreFileHeader`)
//! - `record`: fixed 108-byte record layout (`Record`)
//! - `mmap`: mapping lifecycle and indexed record access (`RecordStore`)

mod header;
mod mmap;
mod record;

pub use header::{StoreFileHeader, CURRENT_VERSION, STORE_MAGIC};
pub use mmap::RecordStore;
pub use record::Record;

/// Size of the word buffer inside a record.
pub const WORD_CAPACITY: usize = 100;

/// Longest storable word. One buffer byte always stays zero.
pub const MAX_WORD_LEN: usize = WORD_CAPACITY - 1;

/// On-disk size of one record: the word buffer plus its 8-byte length field.
/// Writers and readers of a given file must agree on this constant.
pub const RECORD_SIZE: usize = 108;

/// On-disk size of the file header.
pub const FILE_HEADER_SIZE: usize = 64;

/// Exact backing-file length for a store of `capacity` slots.
pub const fn store_len(capacity: u64) -> u64 {
    FILE_HEADER_SIZE as u64 + capacity * RECORD_SIZE as u64
}
