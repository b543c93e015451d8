use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hashdb_lookup::{HashAlgorithm, IndexRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALL_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Generates a specified number of random passwords with uniform distribution.
/// Uses a fixed seed for reproducible benchmark results.
pub fn generate_random_passwords(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let length = rng.gen_range(6..=16);
            (0..length)
                .map(|_| ALL_CHARS[rng.gen_range(0..ALL_CHARS.len())] as char)
                .collect()
        })
        .collect()
}

/// Writes `words` to `dir/words.txt` and their sorted index to
/// `dir/words.idx`.
pub fn write_table(dir: &Path, algorithm: &HashAlgorithm, words: &[String]) {
    let mut dict = BufWriter::new(File::create(dir.join("words.txt")).unwrap());
    let mut records = Vec::with_capacity(words.len());
    let mut offset = 0u64;
    for word in words {
        let digest = algorithm.digest(word.as_bytes()).unwrap();
        records.push(IndexRecord::new(&digest, offset).unwrap());
        dict.write_all(word.as_bytes()).unwrap();
        dict.write_all(b"\n").unwrap();
        offset += word.len() as u64 + 1;
    }
    dict.flush().unwrap();
    records.sort_unstable();

    let mut index = BufWriter::new(File::create(dir.join("words.idx")).unwrap());
    for record in &records {
        index.write_all(&record.encode().unwrap()).unwrap();
    }
    index.flush().unwrap();
}
