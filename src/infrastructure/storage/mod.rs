//! Snapshot storage adapters
//!
//! The JSON file store is used by the CLI. The in-memory store backs the
//! library tests.

mod json;
mod memory;

pub use json::JsonSnapshotStore;
pub use memory::MemorySnapshotStore;
