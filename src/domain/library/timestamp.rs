//! Timestamp: a named offset into a recording

use serde::{Deserialize, Serialize};

use crate::domain::recording::{Duration, RecordingId};

/// A named offset into one recording.
///
/// Carries a copy of the recording's name and identifier so that search
/// results can be displayed without looking the recording up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeStamp {
    pub time_milli: Duration,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub recording_name: String,
    pub recording_uri: RecordingId,
}

impl TimeStamp {
    pub fn new(
        time_milli: Duration,
        title: impl Into<String>,
        description: Option<String>,
        recording_name: impl Into<String>,
        recording_uri: RecordingId,
    ) -> Self {
        Self {
            time_milli,
            title: title.into(),
            description,
            recording_name: recording_name.into(),
            recording_uri,
        }
    }
}
