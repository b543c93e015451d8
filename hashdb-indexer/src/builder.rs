use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use hashdb_lookup::dictionary::trim_line_ending;
use hashdb_lookup::{HashAlgorithm, IndexRecord};
use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Lines between progress log events.
const PROGRESS_INTERVAL: u64 = 100_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Lines read from the word list.
    pub lines: u64,
    /// Records written to the index.
    pub records: u64,
    /// Lines the algorithm could not hash.
    pub skipped: u64,
    /// Bytes of word list consumed.
    pub bytes: u64,
}

/// Writes one index record per word list line, in word list order.
///
/// The output is NOT sorted; run it through [`sort_index`](crate::sort_index)
/// before using it for lookups.
pub fn build_index<R: BufRead, W: Write>(
    algorithm: &HashAlgorithm,
    mut wordlist: R,
    mut output: W,
) -> Result<BuildStats> {
    let mut stats = BuildStats::default();
    let mut line = Vec::with_capacity(256);

    loop {
        line.clear();
        let n = wordlist.read_until(b'\n', &mut line)?;
        if n == 0 {
            break;
        }

        let word = trim_line_ending(&line);
        match algorithm.digest(word) {
            Ok(digest) => {
                let record = IndexRecord::new(&digest, stats.bytes)?;
                output.write_all(&record.encode()?)?;
                stats.records += 1;
            }
            Err(e @ hashdb_lookup::Error::InvalidEncoding { .. }) => {
                warn!(offset = stats.bytes, error = %e, "skipping word");
                stats.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }

        stats.bytes += n as u64;
        stats.lines += 1;
        if stats.lines % PROGRESS_INTERVAL == 0 {
            let gib = stats.bytes as f64 / (1u64 << 30) as f64;
            info!(lines = stats.lines, gib = %format!("{gib:.3}"), "indexing");
        }
    }

    output.flush()?;
    Ok(stats)
}

/// Builds the index for the word list at `wordlist_path` into `output_path`.
///
/// Refuses to replace an existing output unless `force` is set.
pub fn build_index_file(
    algorithm: &HashAlgorithm,
    wordlist_path: &Path,
    output_path: &Path,
    force: bool,
    progress: &ProgressBar,
) -> Result<BuildStats> {
    if output_path.exists() && !force {
        return Err(Error::FileExists { path: output_path.to_path_buf() });
    }

    let wordlist = File::open(wordlist_path).map_err(Error::file(wordlist_path))?;
    progress.set_length(wordlist.metadata()?.len());
    let output = File::create(output_path).map_err(Error::file(output_path))?;

    info!(
        algorithm = algorithm.name(),
        wordlist = %wordlist_path.display(),
        output = %output_path.display(),
        "building index"
    );
    let stats = build_index(
        algorithm,
        BufReader::new(progress.wrap_read(wordlist)),
        BufWriter::new(output),
    )?;
    progress.finish_and_clear();

    info!(
        lines = stats.lines,
        records = stats.records,
        skipped = stats.skipped,
        "index creation complete, sort it before use"
    );
    Ok(stats)
}
