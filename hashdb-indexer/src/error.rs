use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lookup(#[from] hashdb_lookup::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error on '{path}': {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File '{path}' exists. Use --force to overwrite.")]
    FileExists { path: PathBuf },

    #[error("Invalid index file '{path}': size {size} is not a multiple of {record_size}")]
    InvalidIndex { path: PathBuf, size: u64, record_size: usize },

    #[error("Sort memory budget of {bytes} bytes cannot hold a single record")]
    MemoryBudget { bytes: u64 },

    #[error("Index is not sorted: record {position} is greater than record {}", .position + 1)]
    Unsorted { position: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps an I/O error with the path it happened on.
    pub fn file(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::File { path, source }
    }
}
