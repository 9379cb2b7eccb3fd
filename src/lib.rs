//! # mmdict - Memory-Mapped Word Dictionary
//!
//! mmdict persists a word list into a flat file of fixed-size records and
//! answers membership and length-distribution queries directly against the
//! mapped region, without deserializing into an in-memory structure.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::fs::File;
//! use std::io::BufReader;
//! use mmdict::Dictionary;
//!
//! let mut dict = Dictionary::create("./words.dict", 500_000)?;
//! dict.generate(BufReader::new(File::open("/usr/share/dict/words")?))?;
//!
//! assert!(dict.exists("cat"));
//! let five = dict.count_length_equal(5);
//! dict.close()?;
//!
//! // Later, in another process run:
//! let dict = Dictionary::load("./words.dict", 500_000)?;
//! assert!(dict.exists("cat"));
//! ```
//!
//! ## Architecture
//!
//! Two components, layered:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │       Dictionary (word set)          │  generate / load / queries
//! ├─────────────────────────────────────┤
//! │     RecordStore (record slots)       │  create / open / indexed access
//! ├─────────────────────────────────────┤
//! │    Memory-Mapped File I/O (mmap)     │
//! └─────────────────────────────────────┘
//! ```
//!
//! [`store::RecordStore`] owns the fixed-record file format and the mapping
//! lifecycle; [`Dictionary`] populates it from a newline-delimited word list
//! and runs linear-scan queries over the populated slots. No hash or sort
//! index is maintained; every query walks the populated slots.
//!
//! ## File Format
//!
//! A 64-byte header (magic, version, record size, capacity, populated
//! count) followed by exactly `capacity` 108-byte records: a 100-byte
//! zero-padded word buffer and a little-endian length field. See [`store`]
//! for the layout details and invariants.
//!
//! ## Concurrency
//!
//! Single-threaded and synchronous. A backing file must not be opened
//! read/write by two instances at once; the design takes no locks and
//! leaves that exclusion to the caller.
//!
//! ## Module Overview
//!
//! - [`store`]: on-disk format, mapping lifecycle, indexed record access
//! - [`dictionary`]: generate / load / membership and length queries
//! - [`error`]: the shared [`StoreError`] taxonomy

pub mod dictionary;
pub mod error;
pub mod store;

pub use dictionary::{Dictionary, DEFAULT_CAPACITY};
pub use error::{Result, StoreError};
pub use store::{Record, RecordStore};
