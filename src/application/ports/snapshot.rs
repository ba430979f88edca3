//! Snapshot storage port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::library::PackagedData;

/// Snapshot storage errors
#[derive(Debug, Clone, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    ReadFailed(String),

    #[error("Snapshot is corrupt or incompatible: {0}")]
    Corrupt(String),

    #[error("Failed to write snapshot: {0}")]
    WriteFailed(String),
}

/// Port for persisting the annotation snapshot as a whole
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot.
    ///
    /// # Returns
    /// An empty snapshot if nothing has been stored yet
    async fn load(&self) -> Result<PackagedData, SnapshotError>;

    /// Replace the stored snapshot.
    async fn save(&self, snapshot: &PackagedData) -> Result<(), SnapshotError>;
}
