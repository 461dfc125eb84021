//! # error
//!
//! why: give codec failures a type the storage layer can wrap without losing the cause
//! relations: returned by codec.rs, folded into every store's error via `From`
//! what: CodecError

use thiserror::Error;

/// boxed error produced by a pluggable entry codec
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// errors from turning indices and entries into bytes and back
#[derive(Debug, Error)]
pub enum CodecError {
    /// an encoded index must be exactly 8 bytes
    #[error("invalid index encoding: expected 8 bytes, got {0}")]
    InvalidIndexLength(usize),

    /// the entry could not be serialized
    #[error("failed to encode log entry: {0}")]
    Encode(#[source] BoxError),

    /// the stored bytes are not a valid entry
    #[error("failed to decode log entry: {0}")]
    Decode(#[source] BoxError),
}

impl CodecError {
    /// wrap any error as an encode failure
    pub fn encode(err: impl Into<BoxError>) -> Self {
        Self::Encode(err.into())
    }

    /// wrap any error as a decode failure
    pub fn decode(err: impl Into<BoxError>) -> Self {
        Self::Decode(err.into())
    }
}
