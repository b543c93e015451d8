use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("48-bit index offsets need a 64-bit platform, this one has {bits}-bit usize")]
    PlatformUnsupported { bits: u32 },

    #[error("Can't open index file '{path}': {source}")]
    IndexFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Can't open dictionary file '{path}': {source}")]
    DictionaryFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid index file: {0}")]
    InvalidIndex(String),

    #[error("Unknown algorithm name '{0}'")]
    UnknownAlgorithm(String),

    #[error("Invalid hash: {0}")]
    MalformedHash(String),

    #[error("{algorithm} input is not valid UTF-8")]
    InvalidEncoding { algorithm: &'static str },

    #[error("{algorithm} rejected the password as a key")]
    KeyInit { algorithm: &'static str },

    #[error("Offset {0} does not fit in 48 bits")]
    OffsetOutOfRange(u64),

    #[error("Index entry points at offset {offset}, past the end of the dictionary")]
    DictionaryOffset { offset: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
