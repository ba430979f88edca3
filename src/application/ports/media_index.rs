//! Media index port interface

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::{Recording, RecordingId};

/// Media index errors
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    #[error("Recording not found: {0}")]
    NotFound(RecordingId),

    #[error("Permission required to modify {0}")]
    ConsentRequired(RecordingId),

    #[error("A recording named \"{0}\" already exists")]
    NameTaken(String),

    #[error("Invalid recording name: \"{0}\"")]
    InvalidName(String),

    #[error("Media index unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// File mutation that needs the user's consent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentAction {
    Rename,
    Delete,
}

impl fmt::Display for ConsentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename => write!(f, "rename"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Handed back to the caller when the media index refused a mutation until
/// the user grants permission. The caller retries after consent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentRequest {
    pub action: ConsentAction,
    pub recordings: Vec<RecordingId>,
}

impl ConsentRequest {
    pub fn new(action: ConsentAction, recording: RecordingId) -> Self {
        Self {
            action,
            recordings: vec![recording],
        }
    }
}

/// Port for the platform index of audio files
#[async_trait]
pub trait MediaIndex: Send + Sync {
    /// List every recording currently available.
    async fn query(&self) -> Result<Vec<Recording>, MediaError>;

    /// Change the display name of a recording.
    ///
    /// # Returns
    /// The recording's identifier after the rename, which may differ from
    /// `id` when the index derives identifiers from names.
    async fn rename(&self, id: &RecordingId, title: &str) -> Result<RecordingId, MediaError>;

    /// Remove a recording's backing file.
    async fn delete(&self, id: &RecordingId) -> Result<(), MediaError>;
}
