use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, trace};

use crate::algorithm::HashAlgorithm;
use crate::cache::PrefixCache;
use crate::codec::{
    OFFSET_SIZE, PREFIX_SIZE, Prefix, RECORD_SIZE, compare_prefix, decode_offset, decode_prefix,
    ensure_platform_support,
};
use crate::dictionary::read_word_at;
use crate::error::{Error, Result};
use crate::result::CrackResult;

/// Tuning knobs for a [`LookupTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Maximum number of decoded prefixes kept in memory. `None` keeps every
    /// prefix ever read for the lifetime of the table.
    pub cache_capacity: Option<usize>,
}

/// Cracks hashes against one sorted index and the dictionary it was built
/// from.
///
/// Every lookup seeks and reads the underlying files, so `crack` takes
/// `&mut self`. Share a table across threads behind a lock, or open one
/// table per thread over the same files.
pub struct LookupTable {
    index: File,
    dict: BufReader<File>,
    algorithm: HashAlgorithm,
    cache: PrefixCache,
    record_count: u64,
}

impl LookupTable {
    /// Opens `index_path` and `dict_path` for hashes produced by the algorithm
    /// named `algorithm`.
    pub fn open(
        index_path: impl AsRef<Path>,
        dict_path: impl AsRef<Path>,
        algorithm: &str,
    ) -> Result<Self> {
        Self::open_with_options(index_path, dict_path, algorithm, TableOptions::default())
    }

    pub fn open_with_options(
        index_path: impl AsRef<Path>,
        dict_path: impl AsRef<Path>,
        algorithm: &str,
        options: TableOptions,
    ) -> Result<Self> {
        ensure_platform_support()?;
        let algorithm = HashAlgorithm::from_name(algorithm)?;

        let index_path = index_path.as_ref();
        let index = File::open(index_path)
            .map_err(|source| Error::IndexFile { path: index_path.to_path_buf(), source })?;

        let dict_path = dict_path.as_ref();
        let dict = File::open(dict_path)
            .map_err(|source| Error::DictionaryFile { path: dict_path.to_path_buf(), source })?;

        let size = index.metadata()?.len();
        if size % RECORD_SIZE as u64 != 0 {
            return Err(Error::InvalidIndex(format!(
                "size {size} is not a multiple of the {RECORD_SIZE}-byte record size"
            )));
        }
        let record_count = size / RECORD_SIZE as u64;

        debug!(
            index = %index_path.display(),
            dict = %dict_path.display(),
            algorithm = algorithm.name(),
            record_count,
            "opened lookup table"
        );

        Ok(Self {
            index,
            dict: BufReader::new(dict),
            algorithm,
            cache: PrefixCache::new(options.cache_capacity),
            record_count,
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Number of records in the index.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Number of prefixes currently held by the read-through cache.
    pub fn cached_prefixes(&self) -> usize {
        self.cache.len()
    }

    /// Finds every dictionary word whose digest starts with the same 8 bytes
    /// as `hash`.
    ///
    /// `hash` is hex of at least 16 digits, in either case. All candidates
    /// sharing the prefix are returned in index order, whether or not their
    /// full digest equals `hash`; see [`CrackResult::is_full_match`]. An
    /// empty vector means no word matched.
    pub fn crack(&mut self, hash: &str) -> Result<Vec<CrackResult>> {
        let given = parse_hash_query(hash)?;
        let target = decode_prefix(&given);

        let Some(found) = self.search(&target)? else {
            debug!(query_bytes = given.len(), "no index entry for prefix");
            return Ok(Vec::new());
        };

        // The search may land anywhere inside a run of equal prefixes.
        let mut position = found;
        while position > 0 && self.prefix_at(position - 1)? == Some(target) {
            position -= 1;
        }

        let mut results = Vec::new();
        while self.prefix_at(position)? == Some(target) {
            let offset = self.offset_at(position)?;
            let word = read_word_at(&mut self.dict, offset)?;
            let computed = self.algorithm.digest(&word)?;
            results.push(CrackResult::new(word, given.clone(), computed, self.algorithm.name()));
            position += 1;
        }

        debug!(
            query_bytes = given.len(),
            candidates = results.len(),
            full_matches = results.iter().filter(|r| r.is_full_match()).count(),
            "cracked"
        );
        Ok(results)
    }

    /// Binary searches the index for any record whose prefix equals `target`.
    fn search(&mut self, target: &Prefix) -> Result<Option<u64>> {
        let mut low = 0u64;
        let mut high = self.record_count;

        while low < high {
            let mid = low + (high - low) / 2;
            let Some(prefix) = self.prefix_at(mid)? else {
                return Err(Error::InvalidIndex(format!("index ends before record {mid}")));
            };

            match compare_prefix(&prefix, target) {
                Ordering::Equal => return Ok(Some(mid)),
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
            }
        }

        Ok(None)
    }

    /// Returns the prefix stored at `position`, or `None` past the last record.
    fn prefix_at(&mut self, position: u64) -> Result<Option<Prefix>> {
        if position >= self.record_count {
            return Ok(None);
        }
        if let Some(prefix) = self.cache.get(position) {
            return Ok(Some(prefix));
        }

        trace!(position, "prefix cache miss");
        self.index.seek(SeekFrom::Start(position * RECORD_SIZE as u64))?;
        let mut buf = [0u8; PREFIX_SIZE];
        let n = read_fully(&mut self.index, &mut buf)?;
        if n != PREFIX_SIZE {
            return Err(Error::InvalidIndex(format!(
                "read {n} of {PREFIX_SIZE} prefix bytes at record {position}"
            )));
        }

        let prefix = decode_prefix(&buf);
        self.cache.insert(position, prefix);
        Ok(Some(prefix))
    }

    fn offset_at(&mut self, position: u64) -> Result<u64> {
        self.index.seek(SeekFrom::Start(position * RECORD_SIZE as u64 + PREFIX_SIZE as u64))?;
        let mut buf = [0u8; OFFSET_SIZE];
        let n = read_fully(&mut self.index, &mut buf)?;
        if n != OFFSET_SIZE {
            return Err(Error::InvalidIndex(format!(
                "read {n} of {OFFSET_SIZE} offset bytes at record {position}"
            )));
        }
        Ok(decode_offset(&buf))
    }
}

/// Decodes a hex hash query, requiring at least one full prefix worth of
/// bytes.
pub fn parse_hash_query(hash: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(hash).map_err(|e| Error::MalformedHash(e.to_string()))?;
    if bytes.len() < PREFIX_SIZE {
        return Err(Error::MalformedHash(format!(
            "{} bytes is shorter than the {PREFIX_SIZE}-byte prefix",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Reads until `buf` is full or the reader is exhausted, returning the
/// number of bytes read.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    // read() is not guaranteed to fill the buffer in a single call.
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
