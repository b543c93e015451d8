use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hashdb_indexer::{DEFAULT_MEMORY_BUDGET, Error, build_index_file, check_sorted, sort_index};
use hashdb_lookup::{
    DICTIONARY_FILE_NAME, HashAlgorithm, LookupTable, TableOptions, algorithm_names,
    dataset_path_from_env, index_file_name,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hashdb", version)]
#[command(about = "Build and query dictionary lookup tables for password hashes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash every word of a word list into an unsorted index
    Index(IndexArgs),
    /// Sort an index by digest prefix
    Sort(SortArgs),
    /// Check that an index is sorted
    Check(CheckArgs),
    /// Look up hashes in a sorted index
    Crack(CrackArgs),
    /// List supported hash algorithms
    Algorithms,
}

#[derive(Args, Debug)]
struct IndexArgs {
    /// Hash algorithm, see `hashdb algorithms`
    algorithm: HashAlgorithm,

    /// Word list, one word per line
    wordlist: PathBuf,

    /// Index file to write
    output: PathBuf,

    /// Overwrite an existing index file
    #[arg(long)]
    force: bool,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Args, Debug)]
struct SortArgs {
    /// Index file to sort
    index: PathBuf,

    /// Where to write the sorted index (default: sort in place)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sort buffer size in megabytes
    #[arg(short, long, default_value_t = DEFAULT_MEMORY_BUDGET >> 20)]
    memory_mb: u64,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Index file to check
    index: PathBuf,
}

#[derive(Args, Debug)]
struct CrackArgs {
    /// Hash algorithm the index was built with
    #[arg(short, long)]
    algorithm: HashAlgorithm,

    /// Sorted index file (default: $HASHDB_DATA_DIR/words-<algorithm>.idx)
    #[arg(long)]
    index: Option<PathBuf>,

    /// Word list the index was built from (default: $HASHDB_DATA_DIR/words.txt)
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Bound the number of cached index prefixes
    #[arg(long)]
    cache_capacity: Option<usize>,

    /// Hashes to crack, in hex (read from stdin, one per line, if omitted)
    hashes: Vec<String>,
}

fn progress_bar(enabled: bool, template: &str) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb
}

fn index(args: IndexArgs) -> Result<(), Error> {
    let progress = progress_bar(
        !args.no_progress,
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {msg}",
    );
    let stats = build_index_file(&args.algorithm, &args.wordlist, &args.output, args.force, &progress)?;
    println!(
        "Indexed {} of {} lines ({} skipped). Sort the index before using it.",
        stats.records, stats.lines, stats.skipped
    );
    Ok(())
}

fn sort(args: SortArgs) -> Result<(), Error> {
    let progress = progress_bar(
        !args.no_progress,
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    );
    let output = args.output.as_ref().unwrap_or(&args.index);
    let stats = sort_index(&args.index, output, args.memory_mb << 20, &progress)?;
    println!("Index sort complete: {} records, {} runs merged.", stats.records, stats.runs);
    Ok(())
}

fn check(args: CheckArgs) -> Result<(), Error> {
    let report = check_sorted(&args.index)?;
    report.ensure_sorted()?;
    println!("Index is sorted: {} records.", report.records);
    Ok(())
}

fn crack(args: CrackArgs) -> Result<(), Error> {
    let data_dir = dataset_path_from_env();
    let index = args.index.unwrap_or_else(|| data_dir.join(index_file_name(&args.algorithm)));
    let dict = args.dict.unwrap_or_else(|| data_dir.join(DICTIONARY_FILE_NAME));
    let options = TableOptions { cache_capacity: args.cache_capacity };
    let mut table = LookupTable::open_with_options(&index, &dict, args.algorithm.name(), options)?;

    let mut out = io::stdout().lock();
    let mut crack_one = |hash: &str| -> Result<(), Error> {
        let hash = hash.trim();
        if hash.is_empty() {
            return Ok(());
        }
        match table.crack(hash) {
            Ok(results) if results.is_empty() => {
                writeln!(out, "Nothing for {}:{}", args.algorithm, hash)?;
            }
            Ok(results) => {
                for result in results {
                    let partial = if result.is_full_match() { "" } else { " (partial match)" };
                    writeln!(out, "{}:{}{}", hash, result.plaintext_lossy(), partial)?;
                }
            }
            Err(e @ hashdb_lookup::Error::MalformedHash(_)) => {
                eprintln!("{hash}: {e}");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    };

    if args.hashes.is_empty() {
        for line in io::stdin().lock().lines() {
            crack_one(&line?)?;
        }
    } else {
        for hash in &args.hashes {
            crack_one(hash)?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Index(args) => index(args),
        Command::Sort(args) => sort(args),
        Command::Check(args) => check(args),
        Command::Crack(args) => crack(args),
        Command::Algorithms => {
            for name in algorithm_names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}
