use std::cmp::Ordering;

use crate::error::{Error, Result};

/// Bytes of digest prefix stored at the start of every index record.
pub const PREFIX_SIZE: usize = 8;

/// Bytes of little-endian dictionary offset following the prefix.
pub const OFFSET_SIZE: usize = 6;

/// The length of one index record in bytes.
pub const RECORD_SIZE: usize = PREFIX_SIZE + OFFSET_SIZE;

/// One past the largest offset a record can address (2^48).
pub const OFFSET_LIMIT: u64 = 1 << (OFFSET_SIZE * 8);

/// A truncated digest as stored in the index.
pub type Prefix = [u8; PREFIX_SIZE];

/// Fails with [`Error::PlatformUnsupported`] when the native integer width
/// cannot hold a 48-bit offset.
pub fn ensure_platform_support() -> Result<()> {
    if usize::BITS < 64 {
        return Err(Error::PlatformUnsupported { bits: usize::BITS });
    }
    Ok(())
}

/// Reads the prefix out of the first 8 bytes of `buf`.
///
/// # Panics
/// If `buf` is shorter than [`PREFIX_SIZE`].
#[inline]
pub fn decode_prefix(buf: &[u8]) -> Prefix {
    let mut prefix = [0u8; PREFIX_SIZE];
    prefix.copy_from_slice(&buf[..PREFIX_SIZE]);
    prefix
}

/// Reads a 48-bit little-endian offset out of the first 6 bytes of `buf`.
///
/// # Panics
/// If `buf` is shorter than [`OFFSET_SIZE`].
#[inline]
pub fn decode_offset(buf: &[u8]) -> u64 {
    let mut wide = [0u8; 8];
    wide[..OFFSET_SIZE].copy_from_slice(&buf[..OFFSET_SIZE]);
    u64::from_le_bytes(wide)
}

/// Truncates a digest to 8 bytes, right-padding short digests with zeroes.
#[inline]
pub fn encode_prefix(digest: &[u8]) -> Prefix {
    let mut prefix = [0u8; PREFIX_SIZE];
    let len = digest.len().min(PREFIX_SIZE);
    prefix[..len].copy_from_slice(&digest[..len]);
    prefix
}

/// Encodes an offset as 6 little-endian bytes.
#[inline]
pub fn encode_offset(value: u64) -> Result<[u8; OFFSET_SIZE]> {
    if value >= OFFSET_LIMIT {
        return Err(Error::OffsetOutOfRange(value));
    }
    let mut out = [0u8; OFFSET_SIZE];
    out.copy_from_slice(&value.to_le_bytes()[..OFFSET_SIZE]);
    Ok(out)
}

/// Orders two prefixes by unsigned byte-wise comparison.
#[inline]
pub fn compare_prefix(a: &Prefix, b: &Prefix) -> Ordering {
    a.cmp(b)
}

/// A decoded index record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexRecord {
    pub prefix: Prefix,
    pub offset: u64,
}

impl IndexRecord {
    /// Builds the record for a word whose digest is `digest` and which starts
    /// at byte `offset` of the dictionary.
    pub fn new(digest: &[u8], offset: u64) -> Result<Self> {
        if offset >= OFFSET_LIMIT {
            return Err(Error::OffsetOutOfRange(offset));
        }
        Ok(Self { prefix: encode_prefix(digest), offset })
    }

    pub fn decode(buf: &[u8; RECORD_SIZE]) -> Self {
        Self { prefix: decode_prefix(buf), offset: decode_offset(&buf[PREFIX_SIZE..]) }
    }

    pub fn encode(&self) -> Result<[u8; RECORD_SIZE]> {
        let mut out = [0u8; RECORD_SIZE];
        out[..PREFIX_SIZE].copy_from_slice(&self.prefix);
        out[PREFIX_SIZE..].copy_from_slice(&encode_offset(self.offset)?);
        Ok(out)
    }
}
