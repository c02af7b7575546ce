use thiserror::Error;

#[derive(Error, Debug)]
pub enum TidSearchError {
    /// Upper bound of a seed or advance range precedes its lower bound.
    #[error("invalid {what} range: {upper} < {lower}")]
    InvalidRange {
        what: &'static str,
        lower: u32,
        upper: u32,
    },

    /// Database file is structurally malformed.
    #[error("database format error: {0}")]
    Format(String),

    /// Stored digest does not match the table contents.
    #[error("database checksum mismatch")]
    Checksum,

    /// bincode failed to encode or decode the table.
    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    /// CSV export failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Dedicated worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
