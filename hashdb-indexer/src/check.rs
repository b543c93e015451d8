use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::records::{RecordReader, index_record_count};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub records: u64,
    /// First position whose prefix is greater than the next record's.
    pub first_unsorted: Option<u64>,
}

impl CheckReport {
    pub fn is_sorted(&self) -> bool {
        self.first_unsorted.is_none()
    }

    pub fn ensure_sorted(&self) -> Result<()> {
        match self.first_unsorted {
            Some(position) => Err(Error::Unsorted { position }),
            None => Ok(()),
        }
    }
}

/// Scans a stream of index records for prefixes that go down.
pub fn check_records<R: Read>(reader: R) -> Result<CheckReport> {
    let mut report = CheckReport::default();
    let mut previous = None;

    for record in RecordReader::new(reader) {
        let record = record?;
        if report.first_unsorted.is_none() && previous.is_some_and(|prev| prev > record.prefix) {
            report.first_unsorted = Some(report.records - 1);
        }
        previous = Some(record.prefix);
        report.records += 1;
    }

    Ok(report)
}

/// Checks that the index at `path` is well formed and sorted by prefix.
pub fn check_sorted(path: &Path) -> Result<CheckReport> {
    index_record_count(path)?;
    let file = File::open(path).map_err(Error::file(path))?;
    let report = check_records(BufReader::new(file))?;

    match report.first_unsorted {
        None => info!(records = report.records, path = %path.display(), "index is sorted"),
        Some(position) => warn!(position, path = %path.display(), "index is not sorted"),
    }
    Ok(report)
}
