//! Persistence Adapters - Key-Value Snapshot Storage
//!
//! Implements the `KeyValueStore` port over files (atomic tmp + rename)
//! and memory, and builds the `Repository` port on whole-collection JSON
//! snapshots. No database dependency.

pub mod collections;
pub mod file_store;
pub mod memory_store;
pub mod repository_impl;

pub use collections::CollectionStore;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use repository_impl::RepositoryImpl;
