//! Capture use case
//!
//! Drives an [`AudioCapture`] device through the capture session state
//! machine. The produced file shows up in the library on its next reload.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::capture::{CaptureSession, CaptureState, InvalidStateTransition};
use crate::domain::recording::{Duration, Recording, RecordingId};

use super::library::{LibraryError, LibraryStore};
use super::ports::{AudioCapture, CaptureError, MediaIndex};

/// Errors from the capture use case
#[derive(Debug, Error)]
pub enum CaptureUseCaseError {
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("{0}")]
    InvalidState(#[from] InvalidStateTransition),

    #[error("Library error: {0}")]
    Library(#[from] LibraryError),
}

/// Capture use case
pub struct CaptureUseCase<C: AudioCapture> {
    capture: C,
    session: Arc<Mutex<CaptureSession>>,
}

impl<C: AudioCapture> CaptureUseCase<C> {
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            session: Arc::new(Mutex::new(CaptureSession::new())),
        }
    }

    pub async fn state(&self) -> CaptureState {
        self.session.lock().await.state()
    }

    /// Captured length so far
    pub fn elapsed(&self) -> Duration {
        self.capture.elapsed()
    }

    /// Start capturing a new recording.
    ///
    /// The session returns to idle if the device fails to start.
    pub async fn start(&self) -> Result<(), CaptureUseCaseError> {
        let mut session = self.session.lock().await;
        session.start()?;

        if let Err(e) = self.capture.start().await {
            warn!(error = %e, "capture device failed to start");
            session.stop()?;
            return Err(e.into());
        }

        info!("capture started");
        Ok(())
    }

    pub async fn pause(&self) -> Result<(), CaptureUseCaseError> {
        let mut session = self.session.lock().await;
        session.pause()?;

        if let Err(e) = self.capture.pause().await {
            warn!(error = %e, "capture device failed to pause");
            session.resume()?;
            return Err(e.into());
        }
        info!(elapsed = %self.capture.elapsed(), "capture paused");
        Ok(())
    }

    pub async fn resume(&self) -> Result<(), CaptureUseCaseError> {
        let mut session = self.session.lock().await;
        session.resume()?;

        if let Err(e) = self.capture.resume().await {
            warn!(error = %e, "capture device failed to resume");
            session.pause()?;
            return Err(e.into());
        }
        info!("capture resumed");
        Ok(())
    }

    /// Finish capturing and return the new recording's identifier.
    pub async fn stop(&self) -> Result<RecordingId, CaptureUseCaseError> {
        let mut session = self.session.lock().await;
        session.stop()?;

        let id = self.capture.stop().await?;
        info!(recording = %id, "capture stopped");
        Ok(id)
    }

    /// Stop capturing and reload the library so it lists the new recording.
    ///
    /// # Returns
    /// The new recording, or `None` if the media index does not list it yet
    pub async fn stop_into<M: MediaIndex>(
        &self,
        library: &mut LibraryStore<M>,
    ) -> Result<Option<Recording>, CaptureUseCaseError> {
        let id = self.stop().await?;
        library.reload().await?;

        let recording = library.recording(&id).cloned();
        if recording.is_none() {
            warn!(recording = %id, "new recording not listed by the media index yet");
        }
        Ok(recording)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::library::test_support::{make_recording, open_library};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    struct MockCapture {
        fail_start: AtomicBool,
        fail_pause: AtomicBool,
        fail_resume: AtomicBool,
        elapsed: AtomicU64,
        produces: RecordingId,
    }

    impl MockCapture {
        fn new(produces: RecordingId) -> Self {
            Self {
                fail_start: AtomicBool::new(false),
                fail_pause: AtomicBool::new(false),
                fail_resume: AtomicBool::new(false),
                elapsed: AtomicU64::new(0),
                produces,
            }
        }
    }

    #[async_trait]
    impl AudioCapture for MockCapture {
        async fn start(&self) -> Result<(), CaptureError> {
            if self.fail_start.load(Ordering::SeqCst) {
                return Err(CaptureError::NoAudioDevice);
            }
            Ok(())
        }

        async fn pause(&self) -> Result<(), CaptureError> {
            if self.fail_pause.load(Ordering::SeqCst) {
                return Err(CaptureError::NoAudioDevice);
            }
            self.elapsed.store(1500, Ordering::SeqCst);
            Ok(())
        }

        async fn resume(&self) -> Result<(), CaptureError> {
            if self.fail_resume.load(Ordering::SeqCst) {
                return Err(CaptureError::NoAudioDevice);
            }
            Ok(())
        }

        async fn stop(&self) -> Result<RecordingId, CaptureError> {
            Ok(self.produces.clone())
        }

        fn elapsed(&self) -> Duration {
            Duration::from_millis(self.elapsed.load(Ordering::SeqCst))
        }
    }

    fn use_case() -> CaptureUseCase<MockCapture> {
        CaptureUseCase::new(MockCapture::new(RecordingId::new("content://media/new")))
    }

    #[tokio::test]
    async fn full_cycle() {
        let capture = use_case();

        capture.start().await.unwrap();
        assert_eq!(capture.state().await, CaptureState::Recording);
        capture.pause().await.unwrap();
        assert_eq!(capture.state().await, CaptureState::Paused);
        assert_eq!(capture.elapsed(), Duration::from_millis(1500));
        capture.resume().await.unwrap();

        let id = capture.stop().await.unwrap();
        assert_eq!(id.as_str(), "content://media/new");
        assert_eq!(capture.state().await, CaptureState::Idle);
    }

    #[tokio::test]
    async fn invalid_transitions_are_rejected() {
        let capture = use_case();

        assert!(matches!(
            capture.pause().await,
            Err(CaptureUseCaseError::InvalidState(_))
        ));
        assert!(matches!(
            capture.stop().await,
            Err(CaptureUseCaseError::InvalidState(_))
        ));

        capture.start().await.unwrap();
        assert!(matches!(
            capture.start().await,
            Err(CaptureUseCaseError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn failed_start_returns_to_idle() {
        let capture = use_case();
        capture.capture.fail_start.store(true, Ordering::SeqCst);

        assert!(matches!(
            capture.start().await,
            Err(CaptureUseCaseError::Capture(CaptureError::NoAudioDevice))
        ));
        assert_eq!(capture.state().await, CaptureState::Idle);
    }

    #[tokio::test]
    async fn failed_pause_keeps_recording() {
        let capture = use_case();
        capture.start().await.unwrap();
        capture.capture.fail_pause.store(true, Ordering::SeqCst);

        assert!(matches!(
            capture.pause().await,
            Err(CaptureUseCaseError::Capture(CaptureError::NoAudioDevice))
        ));
        assert_eq!(capture.state().await, CaptureState::Recording);

        capture.capture.fail_pause.store(false, Ordering::SeqCst);
        capture.pause().await.unwrap();
        assert_eq!(capture.state().await, CaptureState::Paused);
    }

    #[tokio::test]
    async fn failed_resume_keeps_paused() {
        let capture = use_case();
        capture.start().await.unwrap();
        capture.pause().await.unwrap();
        capture.capture.fail_resume.store(true, Ordering::SeqCst);

        assert!(matches!(
            capture.resume().await,
            Err(CaptureUseCaseError::Capture(CaptureError::NoAudioDevice))
        ));
        assert_eq!(capture.state().await, CaptureState::Paused);

        capture.capture.fail_resume.store(false, Ordering::SeqCst);
        capture.resume().await.unwrap();
        assert_eq!(capture.state().await, CaptureState::Recording);
    }

    #[tokio::test]
    async fn stop_into_library_picks_up_new_recording() {
        let (mut library, media) = open_library(&[("old", 1)]).await;
        let capture = use_case();
        capture.start().await.unwrap();
        media.add("new", 2);

        let recording = capture.stop_into(&mut library).await.unwrap().unwrap();

        assert_eq!(recording, make_recording("new", 2));
        assert!(library.data(&recording.id).is_some());
        assert_eq!(library.recordings()[0].name, "new");
    }
}
