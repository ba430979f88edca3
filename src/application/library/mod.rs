//! Library store use case
//!
//! Owns recordings and their annotations, keeps them consistent and submits
//! a snapshot to the persistence queue after every change. Collections are
//! private; callers go through the operations below.
//!
//! Operations are split by concern:
//! - this module: opening, reload, verification, read access, search
//! - `groups`: group lifecycle, membership and ordering
//! - `annotations`: tags, timestamps and the selection
//! - `files`: rename/edit and deletion through the media index

mod annotations;
mod files;
mod groups;
#[cfg(test)]
pub(crate) mod test_support;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::persistence::PersistQueue;
use super::ports::{MediaError, MediaIndex, SnapshotStore};
use crate::domain::library::{PackagedData, RecordingData, RecordingGroup, Tag, TimeStamp};
use crate::domain::recording::{group_by_day, Recording, RecordingId, RecordingKey};
use crate::domain::search::{SearchHit, SearchQuery, SearchRanker};

pub use files::DeleteOutcome;

/// Errors from the library store
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Media index error: {0}")]
    Media(#[from] MediaError),
}

/// What a verification pass cleaned up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Annotation records whose recording no longer exists
    pub orphaned: Vec<RecordingId>,
    /// Registry tags no longer attached anywhere
    pub pruned_tags: Vec<Tag>,
    /// Attached tags that were missing from the registry
    pub restored_tags: Vec<Tag>,
    /// Records that pointed at a group that no longer exists
    pub detached: Vec<RecordingId>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.orphaned.is_empty()
            && self.pruned_tags.is_empty()
            && self.restored_tags.is_empty()
            && self.detached.is_empty()
    }
}

/// In-memory library of recordings and their annotations
pub struct LibraryStore<M: MediaIndex> {
    media: M,
    /// Newest first
    recordings: Vec<Recording>,
    data: BTreeMap<RecordingId, RecordingData>,
    tags: Vec<Tag>,
    groups: Vec<RecordingGroup>,
    selection: BTreeSet<RecordingId>,
    ranker: SearchRanker,
    persist: PersistQueue,
}

impl<M: MediaIndex> LibraryStore<M> {
    /// Load the stored snapshot and start the persistence worker.
    ///
    /// A snapshot that cannot be read or parsed is discarded and the library
    /// starts empty. Call [`reload`](Self::reload) afterwards to populate
    /// recordings.
    pub async fn open<S>(media: M, store: S, ranker: SearchRanker) -> Self
    where
        S: SnapshotStore + 'static,
    {
        let snapshot = match store.load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "discarding stored snapshot, starting empty");
                PackagedData::empty()
            }
        };
        Self::with_snapshot(media, snapshot, PersistQueue::spawn(store), ranker)
    }

    /// Build a store from an already loaded snapshot.
    pub fn with_snapshot(
        media: M,
        snapshot: PackagedData,
        persist: PersistQueue,
        ranker: SearchRanker,
    ) -> Self {
        let PackagedData {
            groups,
            tags,
            recordings_data,
        } = snapshot;

        let mut data = BTreeMap::new();
        for record in recordings_data {
            if data.contains_key(&record.recording_uri) {
                warn!(recording = %record.recording_uri, "duplicate annotation record in snapshot, keeping the first");
                continue;
            }
            data.insert(record.recording_uri.clone(), record);
        }

        let mut unique_tags: Vec<Tag> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique_tags.contains(&tag) {
                unique_tags.push(tag);
            }
        }

        debug!(
            groups = groups.len(),
            tags = unique_tags.len(),
            records = data.len(),
            "library snapshot loaded"
        );

        Self {
            media,
            recordings: Vec::new(),
            data,
            tags: unique_tags,
            groups,
            selection: BTreeSet::new(),
            ranker,
            persist,
        }
    }

    /// Replace the recording list with a fresh query of the media index.
    ///
    /// Recordings seen for the first time get empty annotations. Annotations
    /// of recordings that did not show up are kept; [`verify`](Self::verify)
    /// removes them.
    pub async fn reload(&mut self) -> Result<(), LibraryError> {
        let mut recordings = self.media.query().await?;
        recordings.sort_by(|a, b| b.date.cmp(&a.date));

        let mut added = 0usize;
        for recording in &recordings {
            if !self.data.contains_key(&recording.id) {
                debug!(recording = %recording.id, "new recording");
                self.data
                    .insert(recording.id.clone(), RecordingData::new(recording.id.clone()));
                added += 1;
            }
        }
        self.recordings = recordings;

        let present: HashSet<&RecordingId> = self.recordings.iter().map(|r| &r.id).collect();
        self.selection.retain(|id| present.contains(id));

        info!(recordings = self.recordings.len(), added, "library reloaded");
        if added > 0 {
            self.persist();
        }
        Ok(())
    }

    /// Remove annotations of vanished recordings and bring the tag registry
    /// and group references in line with what is attached.
    ///
    /// Running it twice in a row changes nothing the second time.
    pub fn verify(&mut self) -> VerifyReport {
        let mut report = VerifyReport::default();

        let present: HashSet<&RecordingId> = self.recordings.iter().map(|r| &r.id).collect();
        report.orphaned = self
            .data
            .keys()
            .filter(|id| !present.contains(id))
            .cloned()
            .collect();
        for id in &report.orphaned {
            debug!(recording = %id, "removing orphaned annotations");
            self.data.remove(id);
        }

        let group_ids: HashSet<_> = self.groups.iter().map(|g| g.uuid).collect();
        for record in self.data.values_mut() {
            if let Some(group) = record.group_uuid {
                if !group_ids.contains(&group) {
                    record.leave_group();
                    report.detached.push(record.recording_uri.clone());
                }
            }
        }

        let data = &self.data;
        let attached = |name: &str| data.values().any(|d| d.has_tag(name));
        let (kept, pruned): (Vec<Tag>, Vec<Tag>) =
            self.tags.drain(..).partition(|t| attached(&t.name));
        self.tags = kept;
        report.pruned_tags = pruned;

        for record in self.data.values() {
            for tag in &record.tags {
                if !self.tags.contains(tag) {
                    self.tags.push(tag.clone());
                    report.restored_tags.push(tag.clone());
                }
            }
        }

        if report.is_clean() {
            debug!("library verified, nothing to clean");
        } else {
            info!(
                orphaned = report.orphaned.len(),
                pruned_tags = report.pruned_tags.len(),
                restored_tags = report.restored_tags.len(),
                detached = report.detached.len(),
                "library verified"
            );
            self.persist();
        }
        report
    }

    /// Recordings, newest first
    pub fn recordings(&self) -> &[Recording] {
        &self.recordings
    }

    pub fn recording(&self, id: &RecordingId) -> Option<&Recording> {
        self.recordings.iter().find(|r| &r.id == id)
    }

    /// First recording with exactly this name
    pub fn recording_named(&self, name: &str) -> Option<&Recording> {
        self.recordings.iter().find(|r| r.name == name)
    }

    pub fn data(&self, id: &RecordingId) -> Option<&RecordingData> {
        self.data.get(id)
    }

    /// Tag registry
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Timestamps of one recording ordered by offset
    pub fn timestamps(&self, id: &RecordingId) -> Vec<&TimeStamp> {
        self.data
            .get(id)
            .map(|d| d.sorted_timestamps())
            .unwrap_or_default()
    }

    /// Recordings bucketed into day sections, newest first
    pub fn recordings_by_day(&self) -> Vec<(RecordingKey, Vec<&Recording>)> {
        group_by_day(&self.recordings)
    }

    /// Ranked search over recordings, timestamps and groups
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchHit<'_>> {
        self.ranker.search(
            query,
            &self.recordings,
            |id| self.data.get(id),
            &self.groups,
        )
    }

    /// Current persistable state
    pub fn snapshot(&self) -> PackagedData {
        PackagedData {
            groups: self.groups.clone(),
            tags: self.tags.clone(),
            recordings_data: self.data.values().cloned().collect(),
        }
    }

    /// Wait until the latest state has been written.
    pub async fn flush(&self) {
        self.persist.flush().await;
    }

    /// Write the latest state and stop the persistence worker.
    pub async fn close(self) {
        self.persist.shutdown().await;
    }

    fn persist(&self) {
        self.persist.submit(self.snapshot());
    }

    fn is_known(&self, id: &RecordingId) -> bool {
        self.recordings.iter().any(|r| &r.id == id)
    }

    /// Annotations of a known recording, recreated if missing
    fn data_mut(&mut self, id: &RecordingId) -> &mut RecordingData {
        self.data.entry(id.clone()).or_insert_with(|| {
            error!(recording = %id, "annotation record missing, recreating it");
            RecordingData::new(id.clone())
        })
    }
}
