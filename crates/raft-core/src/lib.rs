//! # raft-core
//!
//! why: define the storage contract between a raft consensus engine and its persistence
//! relations: used by raft-storage, which implements the traits on top of redb
//! what: log entry types, index and entry codecs, LogStore/StableStore traits

pub mod codec;
pub mod error;
pub mod log;
pub mod storage;

pub use codec::{decode_index, encode_index, EntryCodec, JsonCodec, INDEX_LEN};
pub use error::CodecError;
pub use log::{LogEntry, LogKind};
pub use storage::{LogStore, StableStore, CURRENT_TERM_KEY, LAST_VOTE_CANDIDATE_KEY};
