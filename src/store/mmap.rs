//! Memory-mapped record storage.
//!
//! `RecordStore` owns the backing file and its read/write mapping and hands
//! out bounds-checked, typed views of individual records. The file is always
//! resized to its final length before the mapping is established; the store
//! never remaps after construction.
//!
//! Writes land in the shared mapping and reach disk at the operating
//! system's discretion; only [`RecordStore::sync`] and [`RecordStore::close`]
//! order them behind an explicit flush. There is no journaling and no
//! crash-safety guarantee.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use log::{debug, info};
use memmap2::MmapMut;
use zerocopy::{FromBytes, IntoBytes};

use crate::error::{Result, StoreError};

use super::header::StoreFileHeader;
use super::record::Record;
use super::{store_len, FILE_HEADER_SIZE, RECORD_SIZE};

/// Fixed-capacity, file-backed, memory-mapped sequence of [`Record`]s.
///
/// The capacity is fixed at creation and authoritative over the file length.
/// A store created for N slots must never be opened expecting a different N;
/// [`RecordStore::open_existing`] rejects that with `CorruptStore`.
#[derive(Debug)]
pub struct RecordStore {
    file: File,
    mmap: MmapMut,
    capacity: u64,
    populated: u64,
    path: PathBuf,
}

impl RecordStore {
    /// Creates (or truncates) the backing file at `path`, sized for exactly
    /// `capacity` records, and maps it read/write.
    ///
    /// Any pre-existing content is discarded: capacity decides the file
    /// length, and a fresh store starts with every slot zero-filled and a
    /// populated count of zero.
    pub fn create<P: AsRef<Path>>(path: P, capacity: u64) -> Result<Self> {
        let path = path.as_ref();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        let len = store_len(capacity);
        file.set_len(len)
            .map_err(|e| StoreError::Size {
                expected: len,
                source: e,
            })?;

        // SAFETY: MmapMut::map_mut is unsafe because a mapped file can be
        // modified externally. This is safe because:
        // 1. The file was just created with read+write access and truncated
        // 2. The file holds its final length before the mapping is made
        // 3. The mmap lifetime is tied to RecordStore, and record views
        //    borrow the store, so no view can outlive the mapping
        let mmap = unsafe { MmapMut::map_mut(&file).map_err(StoreError::Map)? };

        let mut store = Self {
            file,
            mmap,
            capacity,
            populated: 0,
            path: path.to_path_buf(),
        };
        store.mmap[..FILE_HEADER_SIZE].copy_from_slice(StoreFileHeader::new(capacity).as_bytes());

        info!(
            "created store '{}' with {} slots",
            store.path.display(),
            capacity
        );
        Ok(store)
    }

    /// Opens the backing file at `path` for a store of `capacity` records.
    ///
    /// If the file length already matches, it is mapped as-is; otherwise it
    /// is first resized to the exact store length, reconciling a file that
    /// does not yet match its capacity. The header must describe a store of
    /// the same capacity and record size, with a populated count within
    /// bounds, or the open fails with `CorruptStore`.
    pub fn open_existing<P: AsRef<Path>>(path: P, capacity: u64) -> Result<Self> {
        let path = path.as_ref();

        let file = OpenOptions::new().read(true).write(true).open(path)?;

        let expected = store_len(capacity);
        let current = file.metadata()?.len();
        if current != expected {
            file.set_len(expected)
                .map_err(|e| StoreError::Size {
                    expected,
                    source: e,
                })?;
        }

        // SAFETY: MmapMut::map_mut is unsafe because a mapped file can be
        // modified externally. This is safe because:
        // 1. The file is opened read+write and sized to its final length
        //    before the mapping is made
        // 2. Concurrent writers are excluded by contract (one store instance
        //    per file)
        // 3. The mmap lifetime is tied to RecordStore, and record views
        //    borrow the store, so no view can outlive the mapping
        let mmap = unsafe { MmapMut::map_mut(&file).map_err(StoreError::Map)? };

        let header = StoreFileHeader::from_bytes(&mmap[..FILE_HEADER_SIZE])?;
        if header.capacity() != capacity {
            return Err(StoreError::CorruptStore(format!(
                "store was created for {} slots, opened expecting {}",
                header.capacity(),
                capacity
            )));
        }
        if header.populated() > capacity {
            return Err(StoreError::CorruptStore(format!(
                "populated count {} exceeds capacity {}",
                header.populated(),
                capacity
            )));
        }
        let populated = header.populated();

        debug!(
            "opened store '{}': {} of {} slots populated",
            path.display(),
            populated,
            capacity
        );

        Ok(Self {
            file,
            mmap,
            capacity,
            populated,
            path: path.to_path_buf(),
        })
    }

    /// Read-only view of the record at `index`, valid while the store is
    /// held.
    pub fn record_at(&self, index: u64) -> Result<&Record> {
        if index >= self.capacity {
            return Err(StoreError::IndexOutOfRange {
                index,
                capacity: self.capacity,
            });
        }

        Ok(&self.records()[index as usize])
    }

    /// Overwrites the slot at `index`.
    pub fn write_record_at(&mut self, index: u64, record: &Record) -> Result<()> {
        if index >= self.capacity {
            return Err(StoreError::IndexOutOfRange {
                index,
                capacity: self.capacity,
            });
        }

        let offset = FILE_HEADER_SIZE + index as usize * RECORD_SIZE;
        self.mmap[offset..offset + RECORD_SIZE].copy_from_slice(record.as_bytes());
        Ok(())
    }

    /// Typed view of all `capacity` slots.
    pub fn records(&self) -> &[Record] {
        // The mapped region is always exactly capacity * RECORD_SIZE bytes
        // past the header.
        <[Record]>::ref_from_bytes(&self.mmap[FILE_HEADER_SIZE..]).unwrap_or(&[])
    }

    /// Number of slots holding generated words, as recorded in the header.
    pub fn populated(&self) -> u64 {
        self.populated
    }

    /// Writes a new populated count through to the mapped header.
    pub(crate) fn set_populated(&mut self, count: u64) -> Result<()> {
        let header = StoreFileHeader::from_bytes_mut(&mut self.mmap[..FILE_HEADER_SIZE])?;
        header.set_populated(count);
        self.populated = count;
        Ok(())
    }

    /// Flushes the mapping to disk.
    pub fn sync(&self) -> Result<()> {
        self.mmap.flush()?;
        Ok(())
    }

    /// Flushes and releases the mapping. The backing file persists.
    ///
    /// Taking `self` by value makes a second close, and any record view
    /// outliving the mapping, a compile error rather than a runtime check.
    pub fn close(self) -> Result<()> {
        self.mmap.flush()?;
        self.file.sync_all()?;
        debug!("closed store '{}'", self.path.display());
        Ok(())
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_len(&self) -> u64 {
        store_len(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_sizes_file_exactly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.dict");

        let store = RecordStore::create(&path, 10).unwrap();

        assert_eq!(store.capacity(), 10);
        assert_eq!(store.file_len(), store_len(10));
        assert_eq!(
            std::fs::metadata(&path).unwrap().len(),
            (FILE_HEADER_SIZE + 10 * RECORD_SIZE) as u64
        );
    }

    #[test]
    fn create_truncates_larger_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.dict");

        std::fs::write(&path, vec![0xFFu8; 100_000]).unwrap();
        let store = RecordStore::create(&path, 3).unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), store_len(3));
        assert!(store.records().iter().all(Record::is_empty));
    }

    #[test]
    fn write_then_read_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.dict");

        let mut store = RecordStore::create(&path, 5).unwrap();
        store
            .write_record_at(2, &Record::new(b"marmot").unwrap())
            .unwrap();

        let record = store.record_at(2).unwrap();
        assert_eq!(record.word(), b"marmot");
        assert_eq!(record.len(), 6);
        assert!(store.record_at(0).unwrap().is_empty());
    }

    #[test]
    fn record_at_out_of_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.dict");

        let store = RecordStore::create(&path, 5).unwrap();

        assert!(store.record_at(4).is_ok());
        assert!(matches!(
            store.record_at(5),
            Err(StoreError::IndexOutOfRange {
                index: 5,
                capacity: 5
            })
        ));
        assert!(store.record_at(100).is_err());
    }

    #[test]
    fn write_record_at_out_of_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.dict");

        let mut store = RecordStore::create(&path, 2).unwrap();
        let record = Record::new(b"stoat").unwrap();

        assert!(matches!(
            store.write_record_at(2, &record),
            Err(StoreError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn close_persists_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.dict");

        let mut store = RecordStore::create(&path, 3).unwrap();
        store
            .write_record_at(0, &Record::new(b"badger").unwrap())
            .unwrap();
        store.set_populated(1).unwrap();
        store.close().unwrap();

        let store = RecordStore::open_existing(&path, 3).unwrap();
        assert_eq!(store.populated(), 1);
        assert_eq!(store.record_at(0).unwrap().word(), b"badger");
    }

    #[test]
    fn open_existing_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent.dict");

        assert!(matches!(
            RecordStore::open_existing(&path, 3),
            Err(StoreError::Io(_))
        ));
    }

    #[test]
    fn open_existing_rejects_capacity_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.dict");

        RecordStore::create(&path, 3).unwrap().close().unwrap();

        let result = RecordStore::open_existing(&path, 5);
        assert!(matches!(result, Err(StoreError::CorruptStore(_))));
    }

    #[test]
    fn open_existing_rejects_foreign_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.dict");

        std::fs::write(&path, vec![0u8; store_len(3) as usize]).unwrap();

        let result = RecordStore::open_existing(&path, 3);
        assert!(matches!(result, Err(StoreError::CorruptStore(_))));
    }

    #[test]
    fn open_existing_rejects_populated_beyond_capacity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.dict");

        {
            let mut store = RecordStore::create(&path, 3).unwrap();
            let header =
                StoreFileHeader::from_bytes_mut(&mut store.mmap[..FILE_HEADER_SIZE]).unwrap();
            header.set_populated(4);
            store.close().unwrap();
        }

        let result = RecordStore::open_existing(&path, 3);
        assert!(matches!(result, Err(StoreError::CorruptStore(_))));
    }

    #[test]
    fn zero_capacity_store_is_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.dict");

        let store = RecordStore::create(&path, 0).unwrap();

        assert_eq!(store.capacity(), 0);
        assert!(store.records().is_empty());
        assert_eq!(
            std::fs::metadata(&path).unwrap().len(),
            FILE_HEADER_SIZE as u64
        );
    }
}
