mod common;

use std::time::{Duration, Instant};

use common::{generate_random_passwords, write_table};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hashdb_lookup::{HashAlgorithm, LookupTable, TableOptions};

const TABLE_WORDS: usize = 200_000;
const QUERY_WORDS: usize = 20;

struct Setup {
    dir: tempfile::TempDir,
    present: Vec<String>,
    absent: Vec<String>,
}

/// Builds an md5 table of random words, plus full-digest queries for words
/// that are and are not in it.
fn setup() -> Setup {
    let md5 = HashAlgorithm::from_name("md5").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let words = generate_random_passwords(TABLE_WORDS, 42);
    write_table(dir.path(), &md5, &words);

    let hex = |w: &String| md5.hex_digest(w.as_bytes()).unwrap();
    let present = words.iter().step_by(TABLE_WORDS / QUERY_WORDS).map(hex).collect();
    // Suffixed, so none of these are in the table.
    let absent = generate_random_passwords(QUERY_WORDS, 7)
        .iter()
        .map(|w| hex(&format!("{w}-absent")))
        .collect();

    Setup { dir, present, absent }
}

fn open(setup: &Setup, options: TableOptions) -> LookupTable {
    let dir = setup.dir.path();
    LookupTable::open_with_options(dir.join("words.idx"), dir.join("words.txt"), "md5", options)
        .unwrap()
}

fn bench_present_hashes(c: &mut Criterion) {
    let setup = setup();
    let mut table = open(&setup, TableOptions::default());

    c.bench_function("present_hashes_20", |b| {
        b.iter(|| {
            for hash in &setup.present {
                black_box(table.crack(black_box(hash)).unwrap());
            }
        })
    });
}

fn bench_absent_hashes(c: &mut Criterion) {
    let setup = setup();
    let mut table = open(&setup, TableOptions::default());

    c.bench_function("absent_hashes_20", |b| {
        b.iter(|| {
            for hash in &setup.absent {
                black_box(table.crack(black_box(hash)).unwrap());
            }
        })
    });
}

fn bench_bounded_cache(c: &mut Criterion) {
    let setup = setup();
    let mut table = open(&setup, TableOptions { cache_capacity: Some(64) });

    c.bench_function("present_hashes_20_cache_64", |b| {
        b.iter(|| {
            for hash in &setup.present {
                black_box(table.crack(black_box(hash)).unwrap());
            }
        })
    });
}

/// Cold cache benchmark
/// Opens a fresh table for every pass so every prefix read hits the file.
fn bench_cold_cache(c: &mut Criterion) {
    let setup = setup();

    let mut group = c.benchmark_group("cold_cache");
    // We can't turn the warmup off, but we can set it to a comically low threshold to essentially
    // turn it off. Note: This panics if set to zero duration.
    group.warm_up_time(Duration::from_nanos(1));

    group.bench_function("present_hashes_20", |b| {
        b.iter_custom(|iters| {
            let mut elapsed = Duration::ZERO;
            for _ in 0..iters {
                let mut table = open(&setup, TableOptions::default());
                let start = Instant::now();
                for hash in &setup.present {
                    black_box(table.crack(hash).unwrap());
                }
                elapsed += start.elapsed();
            }
            elapsed
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_present_hashes,
    bench_absent_hashes,
    bench_bounded_cache,
    bench_cold_cache,
);
criterion_main!(benches);
