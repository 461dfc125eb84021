//! # log
//!
//! why: define the unit of replication that the consensus engine hands to storage
//! relations: encoded by codec.rs, persisted through the LogStore trait in storage.rs
//! what: LogEntry struct, LogKind tag

use serde::{Deserialize, Serialize};

/// what a log entry means to the consensus engine
///
/// storage never interprets the kind, it only round-trips it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogKind {
    /// client command applied to the state machine
    #[default]
    Command,
    /// written by a new leader to assert its term
    Noop,
    /// marks that every preceding entry must be applied first
    Barrier,
    /// cluster membership change
    Configuration,
}

/// a single entry in the replicated log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// the index of this entry in the log (1-indexed, 0 means "no entry")
    pub index: u64,
    /// the term when this entry was created
    pub term: u64,
    /// how the consensus engine interprets `data`
    #[serde(default)]
    pub kind: LogKind,
    /// opaque payload
    pub data: Vec<u8>,
}

impl LogEntry {
    /// create a new command entry
    pub fn new(term: u64, index: u64, data: Vec<u8>) -> Self {
        Self::with_kind(term, index, LogKind::Command, data)
    }

    /// create an entry of the given kind
    pub fn with_kind(term: u64, index: u64, kind: LogKind, data: Vec<u8>) -> Self {
        Self {
            index,
            term,
            kind,
            data,
        }
    }
}
