//! # store
//!
//! why: persist the raft log and stable facts in an ordered, crash-safe key-value engine
//! relations: implements raft-core's LogStore and StableStore on top of redb
//! what: Store, the two tables it owns, open/close lifecycle

use std::fs;
use std::path::{Path, PathBuf};

use raft_core::{decode_index, encode_index, EntryCodec, JsonCodec, LogEntry, LogStore, StableStore};
use redb::{Database, ReadableTable, TableDefinition};
use tracing::{debug, info, instrument, trace};

use crate::config::StoreConfig;
use crate::error::StoreError;

// Key: 8-byte big-endian index, Value: codec bytes of the entry
const LOGS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("logs");

// Key: caller bytes, Value: caller bytes
const STABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("stable");

/// durable log and stable store backed by redb
///
/// log entries and stable facts live in separate tables, so no stable key can
/// be mistaken for a log index. every mutation is a single write transaction:
/// it commits whole or not at all
pub struct Store<C = JsonCodec> {
    db: Database,
    codec: C,
    path: PathBuf,
}

impl Store<JsonCodec> {
    /// open (or create) a store in `dir` with default settings
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_with_codec(StoreConfig::new(dir), JsonCodec)
    }
}

impl<C: EntryCodec> Store<C> {
    /// open (or create) a store with an explicit config and entry codec
    #[instrument(skip(config, codec), fields(dir = %config.dir.display()))]
    pub fn open_with_codec(config: StoreConfig, codec: C) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.dir)?;

        let path = config.db_path();
        let db = redb::Builder::new()
            .set_cache_size(config.cache_size)
            .create(&path)?;

        // create both tables up front so read transactions never miss one
        let txn = db.begin_write()?;
        txn.open_table(LOGS)?;
        txn.open_table(STABLE)?;
        txn.commit()?;

        info!(path = %path.display(), "opened raft store");
        Ok(Self { db, codec, path })
    }

    /// release the database handle
    pub fn close(self) -> Result<(), StoreError> {
        let Self { db, path, .. } = self;
        drop(db);
        info!(path = %path.display(), "closed raft store");
        Ok(())
    }

    /// location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<C: EntryCodec> LogStore for Store<C> {
    type Error = StoreError;

    fn first_index(&self) -> Result<u64, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(LOGS)?;
        let first = match table.first()? {
            Some((key, _)) => decode_index(key.value())?,
            None => 0,
        };
        Ok(first)
    }

    fn last_index(&self) -> Result<u64, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(LOGS)?;
        let last = match table.last()? {
            Some((key, _)) => decode_index(key.value())?,
            None => 0,
        };
        Ok(last)
    }

    fn get_log(&self, index: u64) -> Result<LogEntry, StoreError> {
        trace!(index, "get log");
        let key = encode_index(index);
        let txn = self.db.begin_read()?;
        let table = txn.open_table(LOGS)?;
        let value = table
            .get(key.as_slice())?
            .ok_or(StoreError::LogNotFound(index))?;
        let entry = self.codec.decode(value.value())?;
        Ok(entry)
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    fn store_logs(&self, entries: &[LogEntry]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LOGS)?;
            for entry in entries {
                // an early return drops the uncommitted txn, discarding the whole batch
                let value = self.codec.encode(entry)?;
                table.insert(encode_index(entry.index).as_slice(), value.as_slice())?;
            }
        }
        txn.commit()?;

        debug!(
            first = entries[0].index,
            last = entries[entries.len() - 1].index,
            "stored log batch"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete_range(&self, min: u64, max: u64) -> Result<(), StoreError> {
        if min > max {
            return Ok(());
        }

        let start = encode_index(min);
        let limit = encode_index(max);

        let txn = self.db.begin_write()?;
        let mut removed = 0usize;
        {
            let mut table = txn.open_table(LOGS)?;
            table.retain_in(start.as_slice()..limit.as_slice(), |_, _| {
                removed += 1;
                false
            })?;
            // range above is exclusive of its limit, so `max` goes separately
            if table.remove(limit.as_slice())?.is_some() {
                removed += 1;
            }
        }
        txn.commit()?;

        debug!(removed, "deleted log range");
        Ok(())
    }
}

impl<C: EntryCodec> StableStore for Store<C> {
    type Error = StoreError;

    fn set(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(STABLE)?;
        let value = table
            .get(key)?
            .map(|guard| guard.value().to_vec())
            .unwrap_or_default();
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_store_has_no_indices() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        assert_eq!(store.first_index().unwrap(), 0);
        assert_eq!(store.last_index().unwrap(), 0);
        assert!(store.get_log(10).unwrap_err().is_log_not_found());
    }

    #[test]
    fn open_creates_database_file() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("nested").join("raft")).unwrap();

        assert!(store.path().exists());
        assert!(store.path().ends_with("raft.redb"));
    }

    #[test]
    fn delete_range_includes_upper_bound() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        let entries: Vec<_> = (1..=3).map(|i| LogEntry::new(1, i, vec![i as u8])).collect();
        store.store_logs(&entries).unwrap();

        store.delete_range(3, 3).unwrap();

        assert_eq!(store.last_index().unwrap(), 2);
        assert!(store.get_log(3).unwrap_err().is_log_not_found());
    }

    #[test]
    fn delete_range_clears_large_middle_span() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        let entries: Vec<_> = (1..=1000).map(|i| LogEntry::new(1, i, Vec::new())).collect();
        store.store_logs(&entries).unwrap();

        store.delete_range(100, 900).unwrap();

        assert!(store.get_log(99).is_ok());
        assert!(store.get_log(100).unwrap_err().is_log_not_found());
        assert!(store.get_log(500).unwrap_err().is_log_not_found());
        assert!(store.get_log(900).unwrap_err().is_log_not_found());
        assert!(store.get_log(901).is_ok());
        assert_eq!(store.first_index().unwrap(), 1);
        assert_eq!(store.last_index().unwrap(), 1000);
    }

    #[test]
    fn stable_keys_do_not_leak_into_log() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        // looks exactly like the key for index 5
        store.set(&encode_index(5), b"not a log entry").unwrap();

        assert_eq!(store.first_index().unwrap(), 0);
        assert_eq!(store.last_index().unwrap(), 0);
        assert!(store.get_log(5).unwrap_err().is_log_not_found());
    }

    #[test]
    fn close_releases_the_database() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store.set(b"k", b"v").unwrap();
        store.close().unwrap();

        let reopened = Store::open(dir.path()).unwrap();
        assert_eq!(reopened.get(b"k").unwrap(), b"v".to_vec());
    }
}
