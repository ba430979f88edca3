//! Shared fixtures for library store tests

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};

use super::LibraryStore;
use crate::application::ports::{MediaError, MediaIndex, SnapshotError, SnapshotStore};
use crate::domain::library::PackagedData;
use crate::domain::recording::{Duration, Recording, RecordingId};
use crate::domain::search::SearchRanker;
use crate::infrastructure::MemorySnapshotStore;

#[derive(Default)]
struct MediaState {
    recordings: Vec<Recording>,
    fail_queries: bool,
    needs_consent: HashSet<RecordingId>,
    broken: HashSet<RecordingId>,
    rekey_on_rename: bool,
    renames: Vec<(RecordingId, String)>,
    deletes: Vec<RecordingId>,
}

/// Media index backed by a shared in-memory list
#[derive(Clone, Default)]
pub(crate) struct MockMediaIndex {
    state: Arc<Mutex<MediaState>>,
}

pub(crate) fn make_recording(name: &str, day: u32) -> Recording {
    let base = Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap();
    // Distinct times within a day keep the newest-first order predictable
    let minutes = name.bytes().map(i64::from).sum::<i64>() % 600;
    Recording {
        id: RecordingId::new(format!("content://media/{}", name)),
        name: name.to_string(),
        duration: Duration::from_secs(60),
        size: 2048,
        date: base + ChronoDuration::minutes(minutes),
        path: PathBuf::from(format!("/rec/{}.m4a", name)),
    }
}

impl MockMediaIndex {
    pub(crate) fn with(specs: &[(&str, u32)]) -> Self {
        let media = Self::default();
        media.state.lock().unwrap().recordings =
            specs.iter().map(|(name, day)| make_recording(name, *day)).collect();
        media
    }

    pub(crate) fn add(&self, name: &str, day: u32) {
        self.state
            .lock()
            .unwrap()
            .recordings
            .push(make_recording(name, day));
    }

    pub(crate) fn remove(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .recordings
            .retain(|r| r.name != name);
    }

    pub(crate) fn fail_queries(&self) {
        self.state.lock().unwrap().fail_queries = true;
    }

    pub(crate) fn require_consent(&self, id: &RecordingId) {
        self.state.lock().unwrap().needs_consent.insert(id.clone());
    }

    pub(crate) fn break_file(&self, id: &RecordingId) {
        self.state.lock().unwrap().broken.insert(id.clone());
    }

    pub(crate) fn rekey_on_rename(&self) {
        self.state.lock().unwrap().rekey_on_rename = true;
    }

    pub(crate) fn renames(&self) -> Vec<(RecordingId, String)> {
        self.state.lock().unwrap().renames.clone()
    }

    pub(crate) fn deletes(&self) -> Vec<RecordingId> {
        self.state.lock().unwrap().deletes.clone()
    }

    fn check(state: &MediaState, id: &RecordingId) -> Result<(), MediaError> {
        if state.needs_consent.contains(id) {
            return Err(MediaError::ConsentRequired(id.clone()));
        }
        if state.broken.contains(id) {
            return Err(MediaError::Io("device busy".to_string()));
        }
        if !state.recordings.iter().any(|r| &r.id == id) {
            return Err(MediaError::NotFound(id.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl MediaIndex for MockMediaIndex {
    async fn query(&self) -> Result<Vec<Recording>, MediaError> {
        let state = self.state.lock().unwrap();
        if state.fail_queries {
            return Err(MediaError::Unavailable("index offline".to_string()));
        }
        Ok(state.recordings.clone())
    }

    async fn rename(&self, id: &RecordingId, title: &str) -> Result<RecordingId, MediaError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, id)?;
        state.renames.push((id.clone(), title.to_string()));

        let new_id = if state.rekey_on_rename {
            RecordingId::new(format!("content://media/{}", title))
        } else {
            id.clone()
        };
        if let Some(r) = state.recordings.iter_mut().find(|r| &r.id == id) {
            r.name = title.to_string();
            r.id = new_id.clone();
        }
        Ok(new_id)
    }

    async fn delete(&self, id: &RecordingId) -> Result<(), MediaError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, id)?;
        state.deletes.push(id.clone());
        state.recordings.retain(|r| &r.id != id);
        Ok(())
    }
}

/// Snapshot store whose content never parses
pub(crate) struct BrokenSnapshotStore;

#[async_trait]
impl SnapshotStore for BrokenSnapshotStore {
    async fn load(&self) -> Result<PackagedData, SnapshotError> {
        Err(SnapshotError::Corrupt("expected value at line 1 column 1".to_string()))
    }

    async fn save(&self, _snapshot: &PackagedData) -> Result<(), SnapshotError> {
        Ok(())
    }
}

pub(crate) async fn open_library_with(
    specs: &[(&str, u32)],
    snapshot: PackagedData,
) -> (LibraryStore<MockMediaIndex>, MockMediaIndex) {
    let media = MockMediaIndex::with(specs);
    let store = MemorySnapshotStore::with_snapshot(snapshot);
    let mut library = LibraryStore::open(media.clone(), store, SearchRanker::default()).await;
    library.reload().await.unwrap();
    (library, media)
}

pub(crate) async fn open_library(
    specs: &[(&str, u32)],
) -> (LibraryStore<MockMediaIndex>, MockMediaIndex) {
    open_library_with(specs, PackagedData::empty()).await
}

pub(crate) fn id_of(library: &LibraryStore<MockMediaIndex>, name: &str) -> RecordingId {
    library
        .recording_named(name)
        .map(|r| r.id.clone())
        .unwrap_or_else(|| panic!("no recording named {}", name))
}
