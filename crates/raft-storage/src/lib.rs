//! # raft-storage
//!
//! why: provide durable persistence for raft's log and stable state on an ordered key-value engine
//! relations: implements raft-core's LogStore/StableStore, used by the consensus engine
//! what: redb-backed Store, StoreConfig, StoreError, InMemoryStore for testing
//!
//! ```no_run
//! use raft_core::{LogEntry, LogStore, StableStore};
//! use raft_storage::Store;
//!
//! # fn main() -> Result<(), raft_storage::StoreError> {
//! let store = Store::open("/var/lib/raft/node-1")?;
//! store.store_log(&LogEntry::new(1, 1, b"set x 1".to_vec()))?;
//! store.save_term_and_vote(1, Some(1))?;
//! assert_eq!(store.last_index()?, 1);
//! store.close()
//! # }
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod store;

pub use config::{StoreConfig, DB_FILE_NAME};
pub use error::StoreError;
pub use memory::InMemoryStore;
pub use store::Store;
