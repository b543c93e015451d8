//! Builds the sorted index files read by [hashdb-lookup](hashdb_lookup).
//!
//! Making a lookup table takes three steps:
//!
//! 1. [`build_index`] hashes every line of a word list and writes one
//!    14-byte record per line, `[8-byte digest prefix][6-byte LE offset]`,
//!    in word list order.
//! 2. [`sort_index`] sorts the records by prefix with a bounded memory
//!    budget, spilling sorted runs to disk for indexes bigger than memory.
//! 3. [`check_sorted`] optionally confirms the result is sorted. The lookup
//!    engine assumes this and never checks it itself.

pub mod builder;
pub mod check;
pub mod error;
pub mod records;
pub mod sort;

pub use builder::{BuildStats, build_index, build_index_file};
pub use check::{CheckReport, check_records, check_sorted};
pub use error::{Error, Result};
pub use records::{RecordReader, index_record_count, write_records};
pub use sort::{DEFAULT_MEMORY_BUDGET, SortStats, sort_index};
