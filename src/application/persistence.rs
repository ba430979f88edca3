//! Single-writer snapshot persistence
//!
//! Mutations submit full snapshots without waiting. One background task owns
//! the [`SnapshotStore`] and writes whatever snapshot is newest when it gets
//! to run, so bursts of mutations collapse into a single write and at most
//! one write is in flight.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::ports::SnapshotStore;
use crate::domain::library::PackagedData;

#[derive(Debug, Default)]
struct Pending {
    generation: u64,
    snapshot: Option<Arc<PackagedData>>,
}

/// Handle to the persistence worker
pub struct PersistQueue {
    pending: watch::Sender<Pending>,
    written: watch::Receiver<u64>,
    worker: JoinHandle<()>,
}

impl PersistQueue {
    /// Spawn the worker on the current tokio runtime.
    pub fn spawn<S>(store: S) -> Self
    where
        S: SnapshotStore + 'static,
    {
        let (pending, pending_rx) = watch::channel(Pending::default());
        let (written_tx, written) = watch::channel(0u64);
        let worker = tokio::spawn(run_worker(store, pending_rx, written_tx));

        Self {
            pending,
            written,
            worker,
        }
    }

    /// Queue a snapshot, replacing any snapshot not yet written.
    pub fn submit(&self, snapshot: PackagedData) {
        let snapshot = Arc::new(snapshot);
        self.pending.send_modify(|p| {
            p.generation += 1;
            p.snapshot = Some(snapshot);
        });
    }

    /// Number of snapshots submitted so far
    pub fn submitted(&self) -> u64 {
        self.pending.borrow().generation
    }

    /// Wait until the latest submitted snapshot has been written (or the
    /// write attempted and logged as failed).
    pub async fn flush(&self) {
        let target = self.submitted();
        let mut written = self.written.clone();
        if written.wait_for(|done| *done >= target).await.is_err() {
            error!("persistence worker stopped before flushing");
        }
    }

    /// Stop accepting snapshots and wait for the worker to write the last one.
    pub async fn shutdown(self) {
        let Self {
            pending, worker, ..
        } = self;
        drop(pending);
        if let Err(e) = worker.await {
            error!(error = %e, "persistence worker panicked");
        }
    }
}

async fn run_worker<S: SnapshotStore>(
    store: S,
    mut pending: watch::Receiver<Pending>,
    written: watch::Sender<u64>,
) {
    // `changed` still yields an unseen value after the sender is dropped
    while pending.changed().await.is_ok() {
        let (generation, snapshot) = {
            let p = pending.borrow_and_update();
            (p.generation, p.snapshot.clone())
        };
        let Some(snapshot) = snapshot else {
            continue;
        };

        match store.save(&snapshot).await {
            Ok(()) => debug!(generation, "snapshot written"),
            Err(e) => error!(generation, error = %e, "failed to write snapshot"),
        }
        written.send_replace(generation);
    }
    debug!("persistence worker finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SnapshotError;
    use crate::domain::library::Tag;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    /// Store whose writes block until the test releases them
    #[derive(Clone)]
    struct GatedStore {
        gate: Arc<Semaphore>,
        saved: Arc<Mutex<Vec<PackagedData>>>,
        in_flight: Arc<AtomicUsize>,
        max_in_flight: Arc<AtomicUsize>,
    }

    impl GatedStore {
        fn new() -> Self {
            Self {
                gate: Arc::new(Semaphore::new(0)),
                saved: Arc::new(Mutex::new(Vec::new())),
                in_flight: Arc::new(AtomicUsize::new(0)),
                max_in_flight: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn saved(&self) -> Vec<PackagedData> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SnapshotStore for GatedStore {
        async fn load(&self) -> Result<PackagedData, SnapshotError> {
            Ok(PackagedData::empty())
        }

        async fn save(&self, snapshot: &PackagedData) -> Result<(), SnapshotError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.gate.acquire().await.unwrap().forget();
            self.saved.lock().unwrap().push(snapshot.clone());
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl SnapshotStore for FailingStore {
        async fn load(&self) -> Result<PackagedData, SnapshotError> {
            Ok(PackagedData::empty())
        }

        async fn save(&self, _snapshot: &PackagedData) -> Result<(), SnapshotError> {
            Err(SnapshotError::WriteFailed("disk full".to_string()))
        }
    }

    fn snapshot_with_tags(n: usize) -> PackagedData {
        PackagedData {
            tags: (0..n).map(|i| Tag::new(format!("t{}", i))).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn burst_of_submissions_coalesces() {
        let store = GatedStore::new();
        let queue = PersistQueue::spawn(store.clone());

        queue.submit(snapshot_with_tags(1));
        // Let the worker pick up the first snapshot and block inside save
        tokio::time::sleep(Duration::from_millis(20)).await;
        for n in 2..=5 {
            queue.submit(snapshot_with_tags(n));
        }

        store.gate.add_permits(10);
        queue.flush().await;

        let saved = store.saved();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved.last().unwrap(), &snapshot_with_tags(5));
        assert_eq!(store.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn shutdown_writes_final_snapshot() {
        let store = GatedStore::new();
        store.gate.add_permits(10);
        let queue = PersistQueue::spawn(store.clone());

        queue.submit(snapshot_with_tags(1));
        queue.submit(snapshot_with_tags(2));
        queue.shutdown().await;

        assert_eq!(store.saved().last().unwrap(), &snapshot_with_tags(2));
    }

    #[tokio::test]
    async fn flush_without_submissions_returns() {
        let queue = PersistQueue::spawn(GatedStore::new());
        assert_eq!(queue.submitted(), 0);
        queue.flush().await;
    }

    #[tokio::test]
    async fn failed_write_does_not_block_flush() {
        let queue = PersistQueue::spawn(FailingStore);
        queue.submit(snapshot_with_tags(1));
        tokio::time::timeout(Duration::from_secs(5), queue.flush())
            .await
            .expect("flush should complete after a failed write");
    }
}
