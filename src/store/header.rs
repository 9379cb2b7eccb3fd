//! File header definitions.
//!
//! Every store file begins with a 64-byte header holding magic bytes, the
//! format version, the record size the file was written with, the slot
//! capacity, and the populated count. The populated count is what lets a
//! later `load` distinguish generated words from zero-filled unused slots.
//!
//! All multi-byte fields are little-endian; the zerocopy `U32`/`U64` wrapper
//! types handle conversion and keep the struct valid at any alignment inside
//! the mapping.

use zerocopy::little_endian::{U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::{Result, StoreError};

use super::{FILE_HEADER_SIZE, RECORD_SIZE};

pub const STORE_MAGIC: &[u8; 16] = b"mmdict store v1\x00";

pub const CURRENT_VERSION: u32 = 1;

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct StoreFileHeader {
    magic: [u8; 16],
    version: U32,
    record_size: U32,
    capacity: U64,
    populated: U64,
    reserved: [u8; 24],
}

const _: () = assert!(std::mem::size_of::<StoreFileHeader>() == FILE_HEADER_SIZE);

impl StoreFileHeader {
    /// Fresh header for a store of `capacity` slots, populated count zero.
    pub fn new(capacity: u64) -> Self {
        Self {
            magic: *STORE_MAGIC,
            version: U32::new(CURRENT_VERSION),
            record_size: U32::new(RECORD_SIZE as u32),
            capacity: U64::new(capacity),
            populated: U64::new(0),
            reserved: [0u8; 24],
        }
    }

    /// Parses and validates a header from the start of a mapped region.
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        if bytes.len() < FILE_HEADER_SIZE {
            return Err(StoreError::CorruptStore(format!(
                "header truncated: {} of {} bytes",
                bytes.len(),
                FILE_HEADER_SIZE
            )));
        }

        let header = Self::ref_from_bytes(&bytes[..FILE_HEADER_SIZE])
            .map_err(|e| StoreError::CorruptStore(format!("unreadable header: {e:?}")))?;

        header.validate()?;
        Ok(header)
    }

    /// Mutable variant of [`Self::from_bytes`], used to update the populated
    /// count in place.
    pub fn from_bytes_mut(bytes: &mut [u8]) -> Result<&mut Self> {
        if bytes.len() < FILE_HEADER_SIZE {
            return Err(StoreError::CorruptStore(format!(
                "header truncated: {} of {} bytes",
                bytes.len(),
                FILE_HEADER_SIZE
            )));
        }

        let header = Self::mut_from_bytes(&mut bytes[..FILE_HEADER_SIZE])
            .map_err(|e| StoreError::CorruptStore(format!("unreadable header: {e:?}")))?;

        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<()> {
        if &self.magic != STORE_MAGIC {
            return Err(StoreError::CorruptStore(
                "not an mmdict store (bad magic)".into(),
            ));
        }

        if self.version.get() != CURRENT_VERSION {
            return Err(StoreError::CorruptStore(format!(
                "unsupported store version {} (expected {})",
                self.version.get(),
                CURRENT_VERSION
            )));
        }

        if self.record_size.get() as usize != RECORD_SIZE {
            return Err(StoreError::CorruptStore(format!(
                "record size {} does not match this build's {}",
                self.record_size.get(),
                RECORD_SIZE
            )));
        }

        Ok(())
    }

    pub fn version(&self) -> u32 {
        self.version.get()
    }

    pub fn record_size(&self) -> u32 {
        self.record_size.get()
    }

    pub fn capacity(&self) -> u64 {
        self.capacity.get()
    }

    pub fn populated(&self) -> u64 {
        self.populated.get()
    }

    pub fn set_populated(&mut self, count: u64) {
        self.populated = U64::new(count);
    }
}
