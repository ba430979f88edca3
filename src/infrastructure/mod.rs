//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the filesystem
//! media index, snapshot stores and the XDG config store.

pub mod config;
pub mod media;
pub mod storage;

// Re-export adapters
pub use config::XdgConfigStore;
pub use media::FsMediaIndex;
pub use storage::{JsonSnapshotStore, MemorySnapshotStore};
