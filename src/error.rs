use thiserror::Error;

/// Convenience result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Error type returned by loading, extraction, and export functions.
///
/// Only the fatal tier surfaces here: a source that cannot be opened or
/// deserialized, or an output artifact that cannot be written. Per-field
/// malformations inside an otherwise loadable batch are absorbed by
/// [`crate::coerce`] and never become errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The invoice batch is not syntactically valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The output artifact could not be written.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The invoice batch parsed but does not have the expected shape
    /// (top-level array of objects, or NDJSON objects).
    #[error("invalid invoice batch: {message}")]
    InvalidBatch { message: String },

    /// A token in the expired-id list is not an integer. There is no
    /// per-token recovery at this layer; the whole run aborts.
    #[error("invalid expired-id list: token '{token}': {message}")]
    ExpiredList { token: String, message: String },
}
