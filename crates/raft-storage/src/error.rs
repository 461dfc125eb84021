//! # error
//!
//! why: keep "missing", "corrupt" and "engine failed" distinguishable for the consensus engine
//! relations: returned by Store and InMemoryStore, wraps raft-core's CodecError and redb's errors
//! what: StoreError

use raft_core::CodecError;
use thiserror::Error;

/// errors from log and stable store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// no entry at this index, e.g. it was compacted away
    #[error("log not found: index {0}")]
    LogNotFound(u64),

    /// stored bytes could not be decoded, or an entry could not be encoded
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// the underlying engine failed, carried unmodified
    #[error("storage engine error: {0}")]
    Storage(#[from] redb::Error),

    /// the store directory could not be created
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// true when the requested entry simply does not exist
    pub fn is_log_not_found(&self) -> bool {
        matches!(self, Self::LogNotFound(_))
    }

    /// true when stored bytes exist but are unreadable
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Self::Codec(CodecError::Decode(_) | CodecError::InvalidIndexLength(_))
        )
    }
}

// each redb error family funnels through redb::Error so `?` works everywhere

impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        Self::Storage(err.into())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        Self::Storage(err.into())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        Self::Storage(err.into())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        Self::Storage(err.into())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        Self::Storage(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_recognisable() {
        let err = StoreError::LogNotFound(10);
        assert!(err.is_log_not_found());
        assert!(!err.is_corrupt());
        assert!(err.to_string().contains("log not found"));
    }

    #[test]
    fn decode_failure_is_corrupt_not_missing() {
        let err: StoreError = CodecError::decode("bad bytes").into();
        assert!(err.is_corrupt());
        assert!(!err.is_log_not_found());
    }

    #[test]
    fn encode_failure_is_neither() {
        let err: StoreError = CodecError::encode("unserializable").into();
        assert!(!err.is_corrupt());
        assert!(!err.is_log_not_found());
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io_err.into();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
