//! # memory
//!
//! why: give consensus-engine tests a store with the same semantics and no disk
//! relations: implements the same raft-core traits as Store
//! what: InMemoryStore

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use raft_core::{EntryCodec, JsonCodec, LogEntry, LogStore, StableStore};

use crate::error::StoreError;

/// in-memory storage for testing
///
/// stores all state in memory, no persistence across restarts. entries still
/// pass through the codec so decode failures look the same as on disk
#[derive(Default)]
pub struct InMemoryStore<C = JsonCodec> {
    logs: Mutex<BTreeMap<u64, Vec<u8>>>,
    stable: Mutex<BTreeMap<Vec<u8>, Vec<u8>>>,
    codec: C,
}

impl InMemoryStore<JsonCodec> {
    /// create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: EntryCodec> InMemoryStore<C> {
    /// create a new in-memory store with a custom codec
    pub fn with_codec(codec: C) -> Self {
        Self {
            logs: Mutex::default(),
            stable: Mutex::default(),
            codec,
        }
    }

    /// number of log entries held
    pub fn len(&self) -> usize {
        self.logs().len()
    }

    /// true when no log entries are held
    pub fn is_empty(&self) -> bool {
        self.logs().is_empty()
    }

    // a panic while holding the lock cannot leave a map half-written
    fn logs(&self) -> MutexGuard<'_, BTreeMap<u64, Vec<u8>>> {
        self.logs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stable(&self) -> MutexGuard<'_, BTreeMap<Vec<u8>, Vec<u8>>> {
        self.stable.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: EntryCodec> LogStore for InMemoryStore<C> {
    type Error = StoreError;

    fn first_index(&self) -> Result<u64, StoreError> {
        Ok(self.logs().keys().next().copied().unwrap_or(0))
    }

    fn last_index(&self) -> Result<u64, StoreError> {
        Ok(self.logs().keys().next_back().copied().unwrap_or(0))
    }

    fn get_log(&self, index: u64) -> Result<LogEntry, StoreError> {
        let logs = self.logs();
        let bytes = logs.get(&index).ok_or(StoreError::LogNotFound(index))?;
        Ok(self.codec.decode(bytes)?)
    }

    fn store_logs(&self, entries: &[LogEntry]) -> Result<(), StoreError> {
        // encode everything before touching the map so a failure applies nothing
        let encoded = entries
            .iter()
            .map(|entry| -> Result<_, StoreError> {
                Ok((entry.index, self.codec.encode(entry)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.logs().extend(encoded);
        Ok(())
    }

    fn delete_range(&self, min: u64, max: u64) -> Result<(), StoreError> {
        if min > max {
            return Ok(());
        }
        let mut logs = self.logs();
        let doomed: Vec<u64> = logs.range(min..=max).map(|(index, _)| *index).collect();
        for index in doomed {
            logs.remove(&index);
        }
        Ok(())
    }
}

impl<C: EntryCodec> StableStore for InMemoryStore<C> {
    type Error = StoreError;

    fn set(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.stable().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>, StoreError> {
        Ok(self.stable().get(key).cloned().unwrap_or_default())
    }
}
