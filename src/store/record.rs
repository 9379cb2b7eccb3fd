//! Fixed-size record layout.
//!
//! Each dictionary entry occupies exactly [`RECORD_SIZE`] bytes on disk: a
//! 100-byte zero-padded word buffer followed by a little-endian length field.
//! The length field is the authoritative word size; it is written once when
//! the record is built and never re-derived from the buffer contents.

use zerocopy::little_endian::U64;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::{Result, StoreError};

use super::{MAX_WORD_LEN, RECORD_SIZE, WORD_CAPACITY};

/// One dictionary entry: a word and its byte length.
///
/// An all-zero `Record` is the canonical empty slot (length 0, empty word),
/// which makes a freshly sized file a store of empty records.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct Record {
    word: [u8; WORD_CAPACITY],
    len: U64,
}

const _: () = assert!(std::mem::size_of::<Record>() == RECORD_SIZE);

impl Record {
    /// Builds a record from word content.
    ///
    /// Fails with [`StoreError::WordTooLong`] when the content exceeds
    /// [`MAX_WORD_LEN`] bytes. Invariant on success: `len()` equals the
    /// content length and the buffer past it is zero.
    pub fn new(word: &[u8]) -> Result<Self> {
        if word.len() > MAX_WORD_LEN {
            return Err(StoreError::WordTooLong {
                len: word.len(),
                max: MAX_WORD_LEN,
            });
        }

        let mut buf = [0u8; WORD_CAPACITY];
        buf[..word.len()].copy_from_slice(word);

        Ok(Self {
            word: buf,
            len: U64::new(word.len() as u64),
        })
    }

    /// The canonical empty slot.
    pub fn empty() -> Self {
        Self {
            word: [0u8; WORD_CAPACITY],
            len: U64::new(0),
        }
    }

    /// Word content, excluding the zero padding.
    pub fn word(&self) -> &[u8] {
        // A corrupt length field must never index past the buffer.
        let len = (self.len.get() as usize).min(MAX_WORD_LEN);
        &self.word[..len]
    }

    /// Stored length field, the authoritative word size.
    pub fn len(&self) -> u64 {
        self.len.get()
    }

    pub fn is_empty(&self) -> bool {
        self.len.get() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_size_is_108() {
        assert_eq!(std::mem::size_of::<Record>(), 108);
    }

    #[test]
    fn record_roundtrip_through_bytes() {
        let record = Record::new(b"ferret").unwrap();

        let bytes = record.as_bytes();
        assert_eq!(bytes.len(), RECORD_SIZE);

        let parsed = Record::ref_from_bytes(bytes).unwrap();
        assert_eq!(parsed.word(), b"ferret");
        assert_eq!(parsed.len(), 6);
    }

    #[test]
    fn word_at_limit_is_accepted() {
        let word = [b'a'; MAX_WORD_LEN];
        let record = Record::new(&word).unwrap();

        assert_eq!(record.len(), MAX_WORD_LEN as u64);
        assert_eq!(record.word(), &word[..]);
    }

    #[test]
    fn word_over_limit_is_rejected() {
        let word = [b'a'; MAX_WORD_LEN + 1];
        let result = Record::new(&word);

        assert!(matches!(
            result,
            Err(StoreError::WordTooLong { len: 100, .. })
        ));
    }

    #[test]
    fn buffer_past_content_is_zero() {
        let record = Record::new(b"cat").unwrap();

        let bytes = record.as_bytes();
        assert!(bytes[3..WORD_CAPACITY].iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_slot_is_all_zero() {
        let record = Record::empty();

        assert!(record.is_empty());
        assert_eq!(record.word(), b"");
        assert!(record.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn corrupt_length_does_not_read_past_buffer() {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[..3].copy_from_slice(b"owl");
        bytes[WORD_CAPACITY..].copy_from_slice(&u64::MAX.to_le_bytes());

        let record = Record::ref_from_bytes(&bytes).unwrap();
        assert_eq!(record.word().len(), MAX_WORD_LEN);
    }
}
