//! Recording entity and its identifier

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::Duration;

/// Stable locator of a recording in the media index.
///
/// This is the join key between a [`Recording`] and its annotation record,
/// and serializes as the plain URI string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordingId(String);

impl RecordingId {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Identifier for a file on the local filesystem (`file://` URI)
    pub fn from_path(path: &Path) -> Self {
        Self(format!("file://{}", path.display()))
    }

    /// The filesystem path, if this identifier is a `file://` URI
    pub fn to_path(&self) -> Option<PathBuf> {
        self.0.strip_prefix("file://").map(PathBuf::from)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordingId {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

/// Facts about one audio file, as reported by the media index.
/// Only `name` changes after creation (through a rename).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    pub id: RecordingId,
    pub name: String,
    pub duration: Duration,
    pub size: u64,
    pub date: DateTime<Utc>,
    pub path: PathBuf,
}

impl Recording {
    /// Human-readable file size
    pub fn size_label(&self) -> String {
        human_readable_size(self.size)
    }

    /// Day bucket this recording belongs to
    pub fn key(&self) -> RecordingKey {
        RecordingKey::from_date(&self.date)
    }
}

/// Format a byte count as `B`, `KB` or `MB` with one decimal.
pub fn human_readable_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Date-section key used to bucket recordings by day. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordingKey {
    pub year: i32,
    pub day_of_year: u32,
}

impl RecordingKey {
    pub fn from_date(date: &DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            day_of_year: date.ordinal(),
        }
    }
}

impl fmt::Display for RecordingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match chrono::NaiveDate::from_yo_opt(self.year, self.day_of_year) {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => write!(f, "{}/{}", self.year, self.day_of_year),
        }
    }
}

/// Group recordings into consecutive day sections, keeping input order.
///
/// Expects `recordings` sorted by date, as the store keeps them.
pub fn group_by_day(recordings: &[Recording]) -> Vec<(RecordingKey, Vec<&Recording>)> {
    let mut sections: Vec<(RecordingKey, Vec<&Recording>)> = Vec::new();
    for recording in recordings {
        let key = recording.key();
        match sections.last_mut() {
            Some((last, members)) if *last == key => members.push(recording),
            _ => sections.push((key, vec![recording])),
        }
    }
    sections
}
