//! Dictionary lookup tables for reversing password hashes.
//!
//! A lookup table is a word list plus an index of the words' digests. The
//! index is a flat file of fixed 14-byte records:
//!
//! ```text
//! [8-byte digest prefix][6-byte little-endian offset into the word list]
//! ```
//!
//! sorted by prefix, so a hash is found with an O(log n) binary search and
//! direct record indexing, with only a handful of reads per lookup even for
//! indexes of hundreds of millions of words. Digests shorter than 8 bytes
//! are zero-padded on the right.
//!
//! Since only 8 bytes of each digest are stored, several words can share a
//! prefix. [`LookupTable::crack`] returns every candidate in that block and
//! leaves it to [`CrackResult::is_full_match`] to tell a full match from a
//! prefix-only one, which also makes deliberately truncated queries work.
//!
//! ```no_run
//! use hashdb_lookup::LookupTable;
//!
//! let mut table = LookupTable::open("words-md5.idx", "words.txt", "md5")?;
//! for result in table.crack("b781cbb29054db12f88f08c6e161c199")? {
//!     println!("{result}");
//! }
//! # Ok::<(), hashdb_lookup::Error>(())
//! ```

use std::path::{Path, PathBuf};

pub mod algorithm;
pub mod cache;
pub mod codec;
pub mod dictionary;
pub mod error;
pub mod result;
pub mod table;

pub use algorithm::{HashAlgorithm, StandardDigest, algorithm_names};
pub use codec::{
    IndexRecord, OFFSET_LIMIT, OFFSET_SIZE, PREFIX_SIZE, Prefix, RECORD_SIZE, decode_offset,
    decode_prefix, encode_offset, encode_prefix,
};
pub use error::{Error, Result};
pub use result::CrackResult;
pub use table::{LookupTable, TableOptions, parse_hash_query};

/// Environment variable name for specifying the directory holding word lists
/// and their indexes.
pub const DATA_DIR_ENV: &str = "HASHDB_DATA_DIR";

/// Returns the dataset path from the HASHDB_DATA_DIR environment variable,
/// or falls back to a `hashdb-data` directory beside this crate.
pub fn dataset_path_from_env() -> PathBuf {
    std::env::var(DATA_DIR_ENV).map(PathBuf::from).unwrap_or_else(|_| {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap_or(Path::new("."))
            .join("hashdb-data")
    })
}

/// Conventional index file name for `algorithm` inside a dataset directory.
pub fn index_file_name(algorithm: &HashAlgorithm) -> String {
    format!("words-{}.idx", algorithm.name().replace('/', "_"))
}

/// Conventional word list file name inside a dataset directory.
pub const DICTIONARY_FILE_NAME: &str = "words.txt";
