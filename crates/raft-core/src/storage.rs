//! # storage
//!
//! why: state what the consensus engine needs from durable storage, independent of any engine
//! relations: implemented by raft-storage (redb-backed Store, InMemoryStore)
//! what: LogStore and StableStore traits, term/vote persistence on top of StableStore

use crate::codec::{decode_index, encode_index};
use crate::error::CodecError;
use crate::log::LogEntry;

/// stable key holding the current term
pub const CURRENT_TERM_KEY: &[u8] = b"CurrentTerm";

/// stable key holding the candidate voted for in the current term
pub const LAST_VOTE_CANDIDATE_KEY: &[u8] = b"LastVoteCand";

/// durable storage for the replicated log
///
/// implementations take `&self`: a store is a shared facade and any
/// synchronisation comes from the engine underneath it
pub trait LogStore {
    /// error returned by every operation
    type Error: std::error::Error + From<CodecError> + Send + Sync + 'static;

    /// smallest index present, or 0 when the log is empty
    fn first_index(&self) -> Result<u64, Self::Error>;

    /// largest index present, or 0 when the log is empty
    fn last_index(&self) -> Result<u64, Self::Error>;

    /// fetch the entry at `index`
    ///
    /// a missing entry is an error the caller can recognise as non-fatal
    /// (e.g. already compacted away), distinct from a corrupt one
    fn get_log(&self, index: u64) -> Result<LogEntry, Self::Error>;

    /// store a single entry
    fn store_log(&self, entry: &LogEntry) -> Result<(), Self::Error> {
        self.store_logs(std::slice::from_ref(entry))
    }

    /// store entries as one atomic batch: all become visible or none do
    ///
    /// indices need not continue the current tail, an existing index is overwritten
    fn store_logs(&self, entries: &[LogEntry]) -> Result<(), Self::Error>;

    /// delete every entry in `[min, max]`, both ends inclusive, atomically
    fn delete_range(&self, min: u64, max: u64) -> Result<(), Self::Error>;
}

/// durable storage for small facts such as term and vote
pub trait StableStore {
    /// error returned by every operation
    type Error: std::error::Error + From<CodecError> + Send + Sync + 'static;

    /// upsert a value
    fn set(&self, key: &[u8], value: &[u8]) -> Result<(), Self::Error>;

    /// read a value, an absent key yields an empty vec rather than an error
    fn get(&self, key: &[u8]) -> Result<Vec<u8>, Self::Error>;

    /// upsert a u64 as 8 big-endian bytes
    fn set_u64(&self, key: &[u8], value: u64) -> Result<(), Self::Error> {
        self.set(key, &encode_index(value))
    }

    /// read a u64, an absent key yields 0
    fn get_u64(&self, key: &[u8]) -> Result<u64, Self::Error> {
        let value = self.get(key)?;
        if value.is_empty() {
            return Ok(0);
        }
        Ok(decode_index(&value)?)
    }

    /// persist the current term and who we voted for in it
    fn save_term_and_vote(&self, term: u64, voted_for: Option<u64>) -> Result<(), Self::Error> {
        self.set_u64(CURRENT_TERM_KEY, term)?;
        match voted_for {
            Some(candidate) => self.set_u64(LAST_VOTE_CANDIDATE_KEY, candidate),
            // empty value reads back as "no vote"
            None => self.set(LAST_VOTE_CANDIDATE_KEY, &[]),
        }
    }

    /// load the persisted term and vote, `(0, None)` for a fresh node
    fn load_term_and_vote(&self) -> Result<(u64, Option<u64>), Self::Error> {
        let term = self.get_u64(CURRENT_TERM_KEY)?;
        let vote = self.get(LAST_VOTE_CANDIDATE_KEY)?;
        let voted_for = if vote.is_empty() {
            None
        } else {
            Some(decode_index(&vote)?)
        };
        Ok((term, voted_for))
    }
}
