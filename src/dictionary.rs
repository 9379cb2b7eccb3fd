//! Word-set semantics over a [`RecordStore`].
//!
//! A `Dictionary` is either populated from a newline-delimited word list
//! (`create` + `generate`) or attached to an already-populated backing file
//! (`load`), and thereafter answers membership and length-distribution
//! queries by linear scan of the populated slots. No index is maintained:
//! at the intended scale (about the size of /usr/share/dict/words) a scan
//! over the mapped region is acceptable, and the queries stay total
//! functions once the store is mapped.

use std::io::BufRead;
use std::path::Path;

use log::info;

use crate::error::{Result, StoreError};
use crate::store::{store_len, Record, RecordStore};

/// Default slot count, roughly the size of /usr/share/dict/words.
pub const DEFAULT_CAPACITY: u64 = 500_000;

/// A populated [`RecordStore`] viewed as a word set.
///
/// The dictionary exclusively owns its store's mapping while open; the
/// backing file outlives it. One instance per backing file; concurrent
/// writers are excluded by contract.
#[derive(Debug)]
pub struct Dictionary {
    store: RecordStore,
}

impl Dictionary {
    /// Creates an empty dictionary sized for `capacity` words at `path`.
    pub fn create<P: AsRef<Path>>(path: P, capacity: u64) -> Result<Self> {
        Ok(Self {
            store: RecordStore::create(path, capacity)?,
        })
    }

    /// Attaches to a pre-populated backing file without re-running
    /// [`Self::generate`].
    ///
    /// The file length must be exactly the store length for `capacity`;
    /// anything else fails with `CorruptStore` rather than silently mapping
    /// a wrong-sized region. The populated count is restored from the file
    /// header.
    pub fn load<P: AsRef<Path>>(path: P, capacity: u64) -> Result<Self> {
        let path = path.as_ref();

        let current = std::fs::metadata(path)?.len();
        let expected = store_len(capacity);
        if current != expected {
            return Err(StoreError::CorruptStore(format!(
                "file is {current} bytes, a store of {capacity} slots is {expected} bytes"
            )));
        }

        let store = RecordStore::open_existing(path, capacity)?;
        info!(
            "loaded dictionary '{}': {} of {} slots populated",
            path.display(),
            store.populated(),
            store.capacity()
        );
        Ok(Self { store })
    }

    /// Populates the store from a newline-delimited word list, one word per
    /// slot in source order starting at slot 0. Returns the word count.
    ///
    /// A single trailing line terminator (`\n` or `\r\n`) is stripped from
    /// each line; what remains is the word, and an empty line is a
    /// legitimate empty word. Lines longer than a record can hold fail fast
    /// with `WordTooLong`; more lines than the store has slots fail with
    /// `CapacityExceeded` before any out-of-bounds write.
    ///
    /// The header's populated count is zeroed before the first slot is
    /// written and set to the final count only after the last one, so a
    /// failed generate leaves a store that reads as empty. On success every
    /// slot past the count is zero-filled.
    pub fn generate<R: BufRead>(&mut self, mut source: R) -> Result<u64> {
        let capacity = self.store.capacity();
        let previous = self.store.populated();
        self.store.set_populated(0)?;

        let mut count: u64 = 0;
        let mut line = Vec::new();
        loop {
            line.clear();
            if source.read_until(b'\n', &mut line)? == 0 {
                break;
            }

            let mut content = line.as_slice();
            if content.last() == Some(&b'\n') {
                content = &content[..content.len() - 1];
                if content.last() == Some(&b'\r') {
                    content = &content[..content.len() - 1];
                }
            }

            if count == capacity {
                return Err(StoreError::CapacityExceeded { capacity });
            }

            let record = Record::new(content)?;
            self.store.write_record_at(count, &record)?;
            count += 1;
        }

        for index in count..previous {
            self.store.write_record_at(index, &Record::empty())?;
        }

        self.store.set_populated(count)?;
        self.store.sync()?;

        info!(
            "generated {} words into '{}'",
            count,
            self.store.path().display()
        );
        Ok(count)
    }

    /// Whether `word` is in the dictionary, compared byte-for-byte,
    /// case-sensitive, no normalization.
    pub fn exists(&self, word: &str) -> bool {
        let needle = word.as_bytes();
        self.populated_records().iter().any(|r| r.word() == needle)
    }

    /// Number of words whose stored length equals `n`.
    pub fn count_length_equal(&self, n: u64) -> u64 {
        self.count_lengths(|len| len == n)
    }

    /// Number of words whose stored length is less than `n`.
    pub fn count_length_less_than(&self, n: u64) -> u64 {
        self.count_lengths(|len| len < n)
    }

    /// Number of words whose stored length is greater than `n`.
    pub fn count_length_greater_than(&self, n: u64) -> u64 {
        self.count_lengths(|len| len > n)
    }

    // All three counts compare the stored length field, never a recomputed
    // word length.
    fn count_lengths<F: Fn(u64) -> bool>(&self, pred: F) -> u64 {
        self.populated_records()
            .iter()
            .filter(|r| pred(r.len()))
            .count() as u64
    }

    fn populated_records(&self) -> &[Record] {
        let records = self.store.records();
        let end = (self.store.populated() as usize).min(records.len());
        &records[..end]
    }

    /// Number of generated words (the populated count, not the capacity).
    pub fn len(&self) -> u64 {
        self.store.populated()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> u64 {
        self.store.capacity()
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Flushes and releases the mapping. The backing file persists.
    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}
