//! Recording groups

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colors handed out to new groups that have no image, in order.
pub const GROUP_PALETTE: &[&str] = &[
    "#5E81AC", "#BF616A", "#A3BE8C", "#EBCB8B", "#B48EAD", "#88C0D0", "#D08770",
];

/// Identifier of a [`RecordingGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    /// Generate a fresh random identifier
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A user-defined, ordered collection of recordings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingGroup {
    pub uuid: GroupId,
    pub name: String,
    #[serde(default)]
    pub image_uri: Option<String>,
    pub fallback_color: String,
}

impl RecordingGroup {
    pub fn new(uuid: GroupId, name: impl Into<String>, fallback_color: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            image_uri: None,
            fallback_color: fallback_color.into(),
        }
    }

    /// Palette color for the n-th group
    pub fn palette_color(index: usize) -> &'static str {
        GROUP_PALETTE[index % GROUP_PALETTE.len()]
    }
}
