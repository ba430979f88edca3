//! Mutations that go through the media index: rename/edit and deletion

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::{LibraryError, LibraryStore};
use crate::application::ports::{ConsentAction, ConsentRequest, MediaError, MediaIndex};
use crate::domain::library::{GroupId, RecordingData, Tag};
use crate::domain::recording::RecordingId;

/// Result of deleting one or more recordings
#[derive(Debug, Default)]
pub struct DeleteOutcome {
    /// Recordings removed from the library
    pub removed: Vec<RecordingId>,
    /// Files whose deletion waits for the user's permission. They are
    /// already gone from the library.
    pub consent: Option<ConsentRequest>,
    /// Recordings left in place because the media index refused them
    pub failed: Vec<(RecordingId, MediaError)>,
    /// Registry tags that lost their last attachment
    pub pruned_tags: Vec<Tag>,
}

impl<M: MediaIndex> LibraryStore<M> {
    /// Rename a recording and replace its description.
    ///
    /// A blank title leaves the name alone. The description is always
    /// overwritten, blank or not. When the media index needs permission for
    /// the rename, the new name is applied in memory anyway and a
    /// [`ConsentRequest`] is returned for the caller to act on.
    pub async fn edit_recording(
        &mut self,
        id: &RecordingId,
        title: &str,
        description: &str,
    ) -> Result<Option<ConsentRequest>, LibraryError> {
        if !self.is_known(id) {
            return Err(MediaError::NotFound(id.clone()).into());
        }

        let title = title.trim();
        let mut current = id.clone();
        let mut consent = None;
        let unchanged = self.recording(id).is_some_and(|r| r.name == title);

        if !title.is_empty() && !unchanged {
            match self.media.rename(id, title).await {
                Ok(new_id) => {
                    if &new_id != id {
                        self.rekey(id, &new_id);
                        current = new_id;
                    }
                }
                Err(MediaError::ConsentRequired(_)) => {
                    info!(recording = %id, "rename needs permission");
                    consent = Some(ConsentRequest::new(ConsentAction::Rename, id.clone()));
                }
                Err(e) => return Err(e.into()),
            }
            self.set_name(&current, title);
            info!(recording = %current, name = title, "recording renamed");
        }

        self.data_mut(&current).description = description.to_string();
        self.persist();
        Ok(consent)
    }

    /// Delete recordings through the media index and drop them from the
    /// library.
    ///
    /// Deletions waiting for permission are removed from the library right
    /// away and reported in [`DeleteOutcome::consent`]. Other failures keep
    /// the recording and are reported in [`DeleteOutcome::failed`].
    pub async fn delete(&mut self, ids: &[RecordingId]) -> DeleteOutcome {
        let mut outcome = DeleteOutcome::default();
        let mut touched: BTreeSet<GroupId> = BTreeSet::new();

        for id in ids {
            if !self.is_known(id) {
                warn!(recording = %id, "cannot delete unknown recording");
                outcome.failed.push((id.clone(), MediaError::NotFound(id.clone())));
                continue;
            }

            match self.media.delete(id).await {
                Ok(()) => {}
                Err(MediaError::ConsentRequired(_)) => {
                    info!(recording = %id, "delete needs permission");
                    match &mut outcome.consent {
                        Some(request) => request.recordings.push(id.clone()),
                        None => {
                            outcome.consent =
                                Some(ConsentRequest::new(ConsentAction::Delete, id.clone()))
                        }
                    }
                }
                Err(e) => {
                    warn!(recording = %id, error = %e, "failed to delete recording");
                    outcome.failed.push((id.clone(), e));
                    continue;
                }
            }

            touched.extend(self.forget(id));
            outcome.removed.push(id.clone());
        }

        if outcome.removed.is_empty() {
            return outcome;
        }

        for group in touched {
            self.normalize_group(group);
        }
        outcome.pruned_tags = self.prune_unattached_tags();

        info!(
            removed = outcome.removed.len(),
            failed = outcome.failed.len(),
            "recordings deleted"
        );
        self.persist();
        outcome
    }

    /// Delete every selected recording.
    pub async fn delete_selection(&mut self) -> DeleteOutcome {
        let targets = self.selected_in_library_order();
        self.delete(&targets).await
    }

    /// Drop a recording and its annotations. Returns the group it was in.
    fn forget(&mut self, id: &RecordingId) -> Option<GroupId> {
        self.recordings.retain(|r| &r.id != id);
        self.selection.remove(id);
        let group = self.data.remove(id).and_then(|d| d.group_uuid);
        debug!(recording = %id, "recording removed from library");
        group
    }

    fn prune_unattached_tags(&mut self) -> Vec<Tag> {
        let data = &self.data;
        let (kept, pruned): (Vec<Tag>, Vec<Tag>) = self
            .tags
            .drain(..)
            .partition(|t| data.values().any(|d| d.has_tag(&t.name)));
        self.tags = kept;
        for tag in &pruned {
            debug!(tag = %tag, "tag no longer attached, removed from registry");
        }
        pruned
    }

    /// Move a recording and its annotations to a new identifier.
    fn rekey(&mut self, old: &RecordingId, new: &RecordingId) {
        if let Some(recording) = self.recordings.iter_mut().find(|r| &r.id == old) {
            recording.id = new.clone();
        }

        let mut record = self
            .data
            .remove(old)
            .unwrap_or_else(|| RecordingData::new(new.clone()));
        record.recording_uri = new.clone();
        for timestamp in &mut record.timestamps {
            timestamp.recording_uri = new.clone();
        }
        self.data.insert(new.clone(), record);

        if self.selection.remove(old) {
            self.selection.insert(new.clone());
        }
        debug!(from = %old, to = %new, "recording identifier changed");
    }

    fn set_name(&mut self, id: &RecordingId, name: &str) {
        if let Some(recording) = self.recordings.iter_mut().find(|r| &r.id == id) {
            recording.name = name.to_string();
        }
        if let Some(record) = self.data.get_mut(id) {
            for timestamp in &mut record.timestamps {
                timestamp.recording_name = name.to_string();
            }
        }
    }
}
