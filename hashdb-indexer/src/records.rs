use std::io::{self, Read, Write};
use std::path::Path;

use hashdb_lookup::{IndexRecord, RECORD_SIZE};

use crate::error::{Error, Result};

/// Returns the number of records in the index at `path`, failing if its size
/// is not a whole number of records.
pub fn index_record_count(path: &Path) -> Result<u64> {
    let size = std::fs::metadata(path).map_err(Error::file(path))?.len();
    if size % RECORD_SIZE as u64 != 0 {
        return Err(Error::InvalidIndex { path: path.to_path_buf(), size, record_size: RECORD_SIZE });
    }
    Ok(size / RECORD_SIZE as u64)
}

/// Streams index records out of a reader.
pub struct RecordReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Position of the next record to be read.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Reads the next record, or `None` at a clean end of input.
    pub fn next_record(&mut self) -> Result<Option<IndexRecord>> {
        let mut buf = [0u8; RECORD_SIZE];
        let mut total = 0usize;
        while total < RECORD_SIZE {
            match self.inner.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        match total {
            0 => Ok(None),
            RECORD_SIZE => {
                self.position += 1;
                Ok(Some(IndexRecord::decode(&buf)))
            }
            n => Err(hashdb_lookup::Error::InvalidIndex(format!(
                "truncated record {} ({n} of {RECORD_SIZE} bytes)",
                self.position
            ))
            .into()),
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<IndexRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Writes records back to back in index format.
pub fn write_records<'a, W: Write>(
    writer: &mut W,
    records: impl IntoIterator<Item = &'a IndexRecord>,
) -> Result<u64> {
    let mut count = 0u64;
    for record in records {
        writer.write_all(&record.encode()?)?;
        count += 1;
    }
    Ok(count)
}
