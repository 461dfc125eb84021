//! # config
//!
//! why: describe where and how a store opens its database
//! relations: consumed by Store::open_with_codec
//! what: StoreConfig

use std::path::PathBuf;

/// name of the database file inside the store directory
pub const DB_FILE_NAME: &str = "raft.redb";

/// configuration for a redb-backed store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// directory holding the database file, created if absent
    pub dir: PathBuf,
    /// page cache size in bytes
    pub cache_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./data/raft"),
            cache_size: 64 * 1024 * 1024, // 64MB
        }
    }
}

impl StoreConfig {
    /// default configuration rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// override the page cache size
    pub fn with_cache_size(mut self, bytes: usize) -> Self {
        self.cache_size = bytes;
        self
    }

    /// full path of the database file
    pub fn db_path(&self) -> PathBuf {
        self.dir.join(DB_FILE_NAME)
    }
}
