//! Audio capture port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::{Duration, RecordingId};

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("No audio device available")]
    NoAudioDevice,
}

/// Port for the audio capture device
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Begin capturing into a new recording.
    async fn start(&self) -> Result<(), CaptureError>;

    async fn pause(&self) -> Result<(), CaptureError>;

    async fn resume(&self) -> Result<(), CaptureError>;

    /// Finish capturing.
    ///
    /// # Returns
    /// Identifier under which the media index will list the new recording
    async fn stop(&self) -> Result<RecordingId, CaptureError>;

    /// Captured length so far, excluding paused time
    fn elapsed(&self) -> Duration;
}
