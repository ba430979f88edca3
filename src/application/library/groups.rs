//! Group lifecycle, membership and ordering

use tracing::{debug, info, warn};

use super::LibraryStore;
use crate::application::ports::MediaIndex;
use crate::domain::library::{GroupId, RecordingGroup};
use crate::domain::recording::{Recording, RecordingId};

impl<M: MediaIndex> LibraryStore<M> {
    pub fn groups(&self) -> &[RecordingGroup] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&RecordingGroup> {
        self.groups.iter().find(|g| g.uuid == id)
    }

    /// First group with exactly this name
    pub fn group_named(&self, name: &str) -> Option<&RecordingGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Members of a group ordered by their order number
    pub fn group_members(&self, group: GroupId) -> Vec<&Recording> {
        let mut members: Vec<(i32, &Recording)> = self
            .recordings
            .iter()
            .filter_map(|r| {
                self.data
                    .get(&r.id)
                    .filter(|d| d.is_in_group(group))
                    .map(|d| (d.group_order_number, r))
            })
            .collect();
        members.sort_by_key(|(order, _)| *order);
        members.into_iter().map(|(_, r)| r).collect()
    }

    /// Create a group and return its identifier.
    ///
    /// Without a color, one is picked from the palette.
    pub fn create_group(
        &mut self,
        name: &str,
        image_uri: Option<String>,
        color: Option<String>,
    ) -> GroupId {
        let mut uuid = GroupId::random();
        while self.group(uuid).is_some() {
            uuid = GroupId::random();
        }

        let color =
            color.unwrap_or_else(|| RecordingGroup::palette_color(self.groups.len()).to_string());
        let mut group = RecordingGroup::new(uuid, name.trim(), color);
        group.image_uri = image_uri;

        info!(group = %uuid, name = %group.name, "group created");
        self.groups.push(group);
        self.persist();
        uuid
    }

    /// Change a group's name and image. A blank name keeps the current one.
    pub fn edit_group(&mut self, id: GroupId, name: &str, image_uri: Option<String>) -> bool {
        let Some(group) = self.groups.iter_mut().find(|g| g.uuid == id) else {
            warn!(group = %id, "cannot edit unknown group");
            return false;
        };

        let name = name.trim();
        if !name.is_empty() {
            group.name = name.to_string();
        }
        group.image_uri = image_uri;
        self.persist();
        true
    }

    /// Delete a group. Its members stay in the library, ungrouped.
    pub fn delete_group(&mut self, id: GroupId) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.uuid != id);
        let removed = self.groups.len() != before;

        let mut detached = 0;
        for record in self.data.values_mut().filter(|d| d.is_in_group(id)) {
            record.leave_group();
            detached += 1;
        }

        if !removed && detached == 0 {
            warn!(group = %id, "cannot delete unknown group");
            return false;
        }

        info!(group = %id, detached, "group deleted");
        self.persist();
        true
    }

    /// Put one recording at the end of a group.
    ///
    /// Returns false when the recording is already in that group or either
    /// side is unknown.
    pub fn add_to_group(&mut self, group: GroupId, recording: &RecordingId) -> bool {
        if !self.can_join(group, recording) {
            return false;
        }

        let Some(previous) = self.assign_to_group(group, recording) else {
            return false;
        };
        self.normalize_group(group);
        if let Some(previous) = previous {
            self.normalize_group(previous);
        }
        self.persist();
        true
    }

    /// Put every selected recording at the end of a group, in library order.
    ///
    /// Each one gets the next free order number, and the group is
    /// renormalized afterwards. Returns how many recordings were added.
    pub fn add_selection_to_group(&mut self, group: GroupId) -> usize {
        if self.group(group).is_none() {
            warn!(group = %group, "cannot add to unknown group");
            return 0;
        }

        let targets = self.selected_in_library_order();
        let mut added = 0;
        let mut left = Vec::new();
        for id in &targets {
            if !self.can_join(group, id) {
                continue;
            }
            if let Some(previous) = self.assign_to_group(group, id) {
                added += 1;
                left.extend(previous);
            }
        }

        if added == 0 {
            return 0;
        }

        self.normalize_group(group);
        left.sort();
        left.dedup();
        for previous in left {
            self.normalize_group(previous);
        }
        self.persist();
        added
    }

    /// Take a recording out of its group and close the gap it leaves.
    pub fn remove_from_group(&mut self, recording: &RecordingId) -> bool {
        let Some(record) = self.data.get_mut(recording) else {
            warn!(recording = %recording, "cannot ungroup unknown recording");
            return false;
        };
        let Some(group) = record.leave_group() else {
            debug!(recording = %recording, "recording is not in a group");
            return false;
        };

        self.normalize_group(group);
        self.persist();
        true
    }

    /// Renumber a group's members densely from 0, keeping their order.
    pub fn order_group(&mut self, group: GroupId) -> bool {
        let changed = self.normalize_group(group);
        if changed {
            self.persist();
        }
        changed
    }

    fn can_join(&self, group: GroupId, recording: &RecordingId) -> bool {
        if self.group(group).is_none() {
            warn!(group = %group, "cannot add to unknown group");
            return false;
        }
        if !self.is_known(recording) {
            warn!(recording = %recording, "cannot group unknown recording");
            return false;
        }
        true
    }

    /// Assign the next order number in `group`.
    ///
    /// Returns `None` when already a member, otherwise the group the
    /// recording left (if any).
    fn assign_to_group(
        &mut self,
        group: GroupId,
        recording: &RecordingId,
    ) -> Option<Option<GroupId>> {
        if self.data_mut(recording).is_in_group(group) {
            debug!(recording = %recording, group = %group, "already in group");
            return None;
        }

        let order = self.next_order(group);
        let record = self.data_mut(recording);
        let previous = record.leave_group();
        record.join_group(group, order);
        debug!(recording = %recording, group = %group, order, "added to group");
        Some(previous)
    }

    fn next_order(&self, group: GroupId) -> i32 {
        self.data
            .values()
            .filter(|d| d.is_in_group(group))
            .map(|d| d.group_order_number)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Returns whether any order number changed.
    pub(super) fn normalize_group(&mut self, group: GroupId) -> bool {
        let mut members: Vec<_> = self
            .data
            .values_mut()
            .filter(|d| d.is_in_group(group))
            .collect();
        // Stable, so equal numbers keep map order
        members.sort_by_key(|d| d.group_order_number);

        let mut changed = false;
        for (position, record) in members.into_iter().enumerate() {
            let position = position as i32;
            if record.group_order_number != position {
                record.group_order_number = position;
                changed = true;
            }
        }
        changed
    }
}
