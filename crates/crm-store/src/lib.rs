//! # crm-store
//!
//! In-memory application state for Agency CRM.
//!
//! - `Snapshot`: immutable view of every collection
//! - `AppStore`: owner of the current snapshot, with catalog write-through
//! - `KeyValueStore`: durable storage backends (memory, JSON files)
//! - `seed`: demo data and the default quotation catalog

pub mod seed;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use snapshot::{Snapshot, SnapshotBuilder};
pub use storage::{open_storage, FileStorage, KeyValueStore, MemoryStorage, StorageError};
pub use store::{load_catalog, AppStore, MODULES_KEY};
