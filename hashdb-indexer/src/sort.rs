//! External merge sort for index files too large to sort in memory.
//!
//! The input is cut into runs that fit the memory budget, each run is sorted
//! in parallel and spilled to a temporary file, and the runs are merged into
//! the output. Records are ordered by prefix and then by dictionary offset,
//! so words sharing a prefix keep their word list order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use hashdb_lookup::{IndexRecord, RECORD_SIZE};
use indicatif::ProgressBar;
use rayon::slice::ParallelSliceMut;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::records::{RecordReader, index_record_count, write_records};

/// Default sort buffer size, 256 MiB.
pub const DEFAULT_MEMORY_BUDGET: u64 = 256 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortStats {
    pub records: u64,
    /// Sorted runs spilled to disk; zero when the index fit in one run.
    pub runs: usize,
}

/// Sorts the index at `input` into `output`. The two may be the same path,
/// in which case the input is replaced once the sorted copy is complete.
pub fn sort_index(
    input: &Path,
    output: &Path,
    memory_budget: u64,
    progress: &ProgressBar,
) -> Result<SortStats> {
    let record_count = index_record_count(input)?;
    let run_capacity = memory_budget / RECORD_SIZE as u64;
    if run_capacity == 0 {
        return Err(Error::MemoryBudget { bytes: memory_budget });
    }

    let work_dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    progress.set_length(record_count);
    info!(records = record_count, run_capacity, input = %input.display(), "sorting index");

    let mut reader = RecordReader::new(BufReader::new(File::open(input).map_err(Error::file(input))?));
    let mut spilled = Vec::new();
    let mut single_run = None;
    let mut remaining = record_count;

    while remaining > 0 {
        let take = remaining.min(run_capacity);
        let mut run = read_run(&mut reader, take)?;
        run.par_sort_unstable();
        remaining -= take;
        progress.inc(take);

        if remaining == 0 && spilled.is_empty() {
            single_run = Some(run);
        } else {
            debug!(run = spilled.len(), records = run.len(), "spilling sorted run");
            spilled.push(spill_run(&run, work_dir)?);
        }
    }
    drop(reader);

    let runs = spilled.len();
    let mut sorted = NamedTempFile::new_in(work_dir).map_err(Error::file(work_dir))?;
    {
        let mut writer = BufWriter::new(sorted.as_file_mut());
        match single_run {
            Some(run) => {
                write_records(&mut writer, &run)?;
            }
            None => {
                merge_runs(spilled, &mut writer)?;
            }
        }
        writer.flush()?;
    }
    sorted.persist(output).map_err(|e| Error::file(output)(e.error))?;
    progress.finish_and_clear();

    info!(records = record_count, runs, output = %output.display(), "index sort complete");
    Ok(SortStats { records: record_count, runs })
}

fn read_run<R: Read>(reader: &mut RecordReader<R>, count: u64) -> Result<Vec<IndexRecord>> {
    let mut run = Vec::with_capacity(count as usize);
    for _ in 0..count {
        match reader.next_record()? {
            Some(record) => run.push(record),
            None => {
                return Err(hashdb_lookup::Error::InvalidIndex(format!(
                    "index ended at record {}, expected more",
                    RecordReader::position(reader)
                ))
                .into());
            }
        }
    }
    Ok(run)
}

fn spill_run(run: &[IndexRecord], dir: &Path) -> Result<File> {
    let file = tempfile::tempfile_in(dir).map_err(Error::file(dir))?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, run)?;
    let mut file = writer.into_inner().map_err(|e| e.into_error())?;
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

/// K-way merges sorted runs into `writer`.
fn merge_runs<W: Write>(runs: Vec<File>, writer: &mut W) -> Result<u64> {
    let mut readers: Vec<RecordReader<BufReader<File>>> =
        runs.into_iter().map(|f| RecordReader::new(BufReader::new(f))).collect();

    let mut heap = BinaryHeap::with_capacity(readers.len());
    for (i, reader) in readers.iter_mut().enumerate() {
        if let Some(record) = reader.next_record()? {
            heap.push(Reverse((record, i)));
        }
    }

    let mut written = 0u64;
    while let Some(Reverse((record, i))) = heap.pop() {
        writer.write_all(&record.encode()?)?;
        written += 1;
        if let Some(next) = readers[i].next_record()? {
            heap.push(Reverse((next, i)));
        }
    }
    Ok(written)
}
