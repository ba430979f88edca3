//! Mutable annotations attached to one recording

use serde::{Deserialize, Serialize};

use super::{GroupId, Tag, TimeStamp};
use crate::domain::recording::{Duration, RecordingId};

/// Order number carried by recordings that belong to no group.
pub const UNGROUPED_ORDER: i32 = -1;

/// Annotations for one recording: tags, description, group membership and
/// timestamps. Matched to its [`Recording`](crate::domain::recording::Recording)
/// by `recording_uri`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingData {
    pub recording_uri: RecordingId,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "groupUUID", default)]
    pub group_uuid: Option<GroupId>,
    #[serde(default = "ungrouped_order")]
    pub group_order_number: i32,
    #[serde(rename = "timeStamps", default)]
    pub timestamps: Vec<TimeStamp>,
}

fn ungrouped_order() -> i32 {
    UNGROUPED_ORDER
}

impl RecordingData {
    /// Empty annotations for a newly seen recording
    pub fn new(recording_uri: RecordingId) -> Self {
        Self {
            recording_uri,
            tags: Vec::new(),
            description: String::new(),
            group_uuid: None,
            group_order_number: UNGROUPED_ORDER,
            timestamps: Vec::new(),
        }
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Append a tag unless one with the same name is present.
    /// Returns whether the tag was added.
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        if self.has_tag(&tag.name) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Returns whether a tag was removed.
    pub fn remove_tag(&mut self, name: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.name != name);
        self.tags.len() != before
    }

    pub fn has_timestamp(&self, time: Duration) -> bool {
        self.timestamps.iter().any(|ts| ts.time_milli == time)
    }

    /// Append a timestamp unless one exists at the same offset.
    /// Returns whether the timestamp was added.
    pub fn add_timestamp(&mut self, timestamp: TimeStamp) -> bool {
        if self.has_timestamp(timestamp.time_milli) {
            return false;
        }
        self.timestamps.push(timestamp);
        true
    }

    /// Returns whether a timestamp was removed.
    pub fn remove_timestamp(&mut self, time: Duration) -> bool {
        let before = self.timestamps.len();
        self.timestamps.retain(|ts| ts.time_milli != time);
        self.timestamps.len() != before
    }

    /// Timestamps ordered by offset
    pub fn sorted_timestamps(&self) -> Vec<&TimeStamp> {
        let mut sorted: Vec<&TimeStamp> = self.timestamps.iter().collect();
        sorted.sort_by_key(|ts| ts.time_milli);
        sorted
    }

    pub fn is_in_group(&self, group: GroupId) -> bool {
        self.group_uuid == Some(group)
    }

    pub fn join_group(&mut self, group: GroupId, order: i32) {
        self.group_uuid = Some(group);
        self.group_order_number = order;
    }

    /// Clear membership. Returns the group left, if any.
    pub fn leave_group(&mut self) -> Option<GroupId> {
        self.group_order_number = UNGROUPED_ORDER;
        self.group_uuid.take()
    }
}
