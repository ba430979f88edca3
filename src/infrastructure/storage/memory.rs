//! In-memory snapshot store

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::ports::{SnapshotError, SnapshotStore};
use crate::domain::library::PackagedData;

#[derive(Debug, Default)]
struct Inner {
    snapshot: Option<PackagedData>,
    saves: usize,
}

/// Snapshot store that keeps the last saved snapshot in memory.
///
/// Clones share the same state, so a test can keep one handle and give the
/// other to the library.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a snapshot already stored
    pub fn with_snapshot(snapshot: PackagedData) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.lock() {
            inner.snapshot = Some(snapshot);
        }
        store
    }

    /// Last stored snapshot, if any
    pub fn current(&self) -> Option<PackagedData> {
        self.inner.lock().ok().and_then(|i| i.snapshot.clone())
    }

    /// Number of completed saves
    pub fn saves(&self) -> usize {
        self.inner.lock().map(|i| i.saves).unwrap_or_default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<PackagedData, SnapshotError> {
        Ok(self.current().unwrap_or_default())
    }

    async fn save(&self, snapshot: &PackagedData) -> Result<(), SnapshotError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| SnapshotError::WriteFailed(e.to_string()))?;
        inner.snapshot = Some(snapshot.clone());
        inner.saves += 1;
        Ok(())
    }
}
