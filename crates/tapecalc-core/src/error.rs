//! Error types for tapecalc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding stored tokens.
///
/// Editing mistakes are not errors: a rejected keystroke reports itself as a
/// plain `false` from the formula automaton.
#[derive(Debug, Error)]
pub enum Error {
    /// An encoded token carried a tag no token kind answers to
    #[error("unknown token tag: {0}")]
    UnknownTag(String),

    /// An encoded token was not a two-element [tag, payload] pair
    #[error("expected a [tag, payload] pair, got: {0}")]
    NotAPair(String),

    /// The payload did not fit the tag's expected shape
    #[error("malformed payload for tag \"{tag}\": {detail}")]
    MalformedPayload { tag: &'static str, detail: String },

    /// A number payload failed the digit-string invariants
    #[error("invalid number payload: {0}")]
    InvalidNumber(String),
}
