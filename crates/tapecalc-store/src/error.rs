//! Error types for tapecalc-store

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while persisting or loading history.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying storage failed
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value was not valid JSON
    #[error("invalid JSON in stored value: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored record existed but did not have the expected shape
    #[error("corrupt history record for id {id}: {detail}")]
    CorruptRecord { id: u64, detail: String },

    /// A stored token failed to decode
    #[error(transparent)]
    Decode(#[from] tapecalc_core::Error),
}
