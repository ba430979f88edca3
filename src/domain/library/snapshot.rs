//! Persisted snapshot of the annotation layer

use serde::{Deserialize, Serialize};

use super::{RecordingData, RecordingGroup, Tag};

/// Everything the annotation layer persists: groups, the tag registry and
/// per-recording data. Recording facts are not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagedData {
    #[serde(default)]
    pub groups: Vec<RecordingGroup>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub recordings_data: Vec<RecordingData>,
}

impl PackagedData {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.tags.is_empty() && self.recordings_data.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}
