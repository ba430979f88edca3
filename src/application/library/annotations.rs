//! Tags, timestamps and the selection

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::LibraryStore;
use crate::application::ports::MediaIndex;
use crate::domain::library::{Tag, TimeStamp};
use crate::domain::recording::{Duration, RecordingId};

impl<M: MediaIndex> LibraryStore<M> {
    /// Attach a tag to one recording, registering the tag if it is new.
    ///
    /// Returns false for a blank name, an unknown recording, or a tag the
    /// recording already has.
    pub fn add_tag(&mut self, recording: &RecordingId, name: &str) -> bool {
        let Some(tag) = Self::tag_from(name) else {
            return false;
        };
        if !self.is_known(recording) {
            warn!(recording = %recording, "cannot tag unknown recording");
            return false;
        }

        let added = self.attach_tag(recording, &tag);
        if added {
            self.persist();
        }
        added
    }

    /// Attach a tag to every selected recording.
    ///
    /// Returns how many recordings gained the tag.
    pub fn add_tag_to_selection(&mut self, name: &str) -> usize {
        let Some(tag) = Self::tag_from(name) else {
            return 0;
        };

        let targets: Vec<RecordingId> = self.selection.iter().cloned().collect();
        let added = targets
            .iter()
            .filter(|id| self.attach_tag(id, &tag))
            .count();
        if added > 0 {
            self.persist();
        }
        added
    }

    /// Detach a tag from one recording. The registry keeps the tag.
    pub fn delete_tag(&mut self, recording: &RecordingId, name: &str) -> bool {
        let Some(record) = self.data.get_mut(recording) else {
            warn!(recording = %recording, "cannot untag unknown recording");
            return false;
        };
        if !record.remove_tag(name) {
            debug!(recording = %recording, tag = name, "tag not attached");
            return false;
        }

        debug!(recording = %recording, tag = name, "tag removed");
        self.persist();
        true
    }

    /// Mark a point of interest in a recording.
    ///
    /// Returns false when the recording is unknown or a timestamp already
    /// exists at that offset.
    pub fn add_timestamp(
        &mut self,
        recording: &RecordingId,
        time: Duration,
        title: &str,
        description: Option<String>,
    ) -> bool {
        let Some(target) = self.recording(recording) else {
            warn!(recording = %recording, "cannot mark unknown recording");
            return false;
        };
        let timestamp = TimeStamp::new(
            time,
            title.trim(),
            description.filter(|d| !d.trim().is_empty()),
            target.name.clone(),
            recording.clone(),
        );
        if !self.data_mut(recording).add_timestamp(timestamp) {
            debug!(recording = %recording, time = %time, "timestamp already exists");
            return false;
        }

        debug!(recording = %recording, time = %time, "timestamp added");
        self.persist();
        true
    }

    /// Remove the timestamp at an exact offset.
    pub fn delete_timestamp(&mut self, recording: &RecordingId, time: Duration) -> bool {
        let removed = self
            .data
            .get_mut(recording)
            .is_some_and(|d| d.remove_timestamp(time));
        if removed {
            debug!(recording = %recording, time = %time, "timestamp removed");
            self.persist();
        }
        removed
    }

    /// Add a recording to the selection. Unknown recordings are ignored.
    pub fn select(&mut self, recording: &RecordingId) -> bool {
        if !self.is_known(recording) {
            return false;
        }
        self.selection.insert(recording.clone())
    }

    pub fn deselect(&mut self, recording: &RecordingId) -> bool {
        self.selection.remove(recording)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &BTreeSet<RecordingId> {
        &self.selection
    }

    pub fn is_selected(&self, recording: &RecordingId) -> bool {
        self.selection.contains(recording)
    }

    /// Selected recordings in the order the library lists them
    pub(super) fn selected_in_library_order(&self) -> Vec<RecordingId> {
        self.recordings
            .iter()
            .filter(|r| self.selection.contains(&r.id))
            .map(|r| r.id.clone())
            .collect()
    }

    fn tag_from(name: &str) -> Option<Tag> {
        let name = name.trim();
        if name.is_empty() {
            warn!("ignoring blank tag name");
            return None;
        }
        Some(Tag::new(name))
    }

    fn attach_tag(&mut self, recording: &RecordingId, tag: &Tag) -> bool {
        if !self.tags.contains(tag) {
            info!(tag = %tag, "tag registered");
            self.tags.push(tag.clone());
        }
        let added = self.data_mut(recording).add_tag(tag.clone());
        if added {
            debug!(recording = %recording, tag = %tag, "tag attached");
        }
        added
    }
}
