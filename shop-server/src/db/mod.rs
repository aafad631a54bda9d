//! Database Module
//!
//! The whole shop state is one JSON document ([`Snapshot`]). A
//! [`SnapshotStore`] loads and atomically commits it; [`Database`] serializes
//! every read-modify-write unit of work behind a single lock.

pub mod document;
pub mod repository;
pub mod store;

pub use document::{Sequences, Snapshot};
pub use store::{Database, JsonFileStore, MemoryStore, SnapshotStore, StoreError};
