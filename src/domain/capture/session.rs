//! Capture session state machine

use std::fmt;
use thiserror::Error;

/// Capture states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Recording,
    Paused,
}

impl CaptureState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: CaptureState,
    pub action: String,
}

/// Capture session entity.
///
/// State machine:
///   IDLE -> RECORDING (start)
///   RECORDING -> PAUSED (pause)
///   PAUSED -> RECORDING (resume)
///   RECORDING | PAUSED -> IDLE (stop)
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
}

impl CaptureSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == CaptureState::Idle
    }

    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    pub fn is_paused(&self) -> bool {
        self.state == CaptureState::Paused
    }

    fn transition(
        &mut self,
        allowed: &[CaptureState],
        next: CaptureState,
        action: &str,
    ) -> Result<(), InvalidStateTransition> {
        if !allowed.contains(&self.state) {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = next;
        Ok(())
    }

    /// Transition from IDLE to RECORDING
    pub fn start(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(&[CaptureState::Idle], CaptureState::Recording, "start")
    }

    /// Transition from RECORDING to PAUSED
    pub fn pause(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(&[CaptureState::Recording], CaptureState::Paused, "pause")
    }

    /// Transition from PAUSED to RECORDING
    pub fn resume(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(&[CaptureState::Paused], CaptureState::Recording, "resume")
    }

    /// Transition from RECORDING or PAUSED to IDLE
    pub fn stop(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            &[CaptureState::Recording, CaptureState::Paused],
            CaptureState::Idle,
            "stop",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = CaptureSession::new();
        assert!(session.is_idle());
        assert!(!session.is_recording());
        assert!(!session.is_paused());
    }

    #[test]
    fn start_from_recording_fails() {
        let mut session = CaptureSession::new();
        session.start().unwrap();

        let err = session.start().unwrap_err();
        assert_eq!(err.current_state, CaptureState::Recording);
        assert!(err.action.contains("start"));
    }

    #[test]
    fn pause_and_resume() {
        let mut session = CaptureSession::new();
        session.start().unwrap();
        session.pause().unwrap();
        assert!(session.is_paused());
        session.resume().unwrap();
        assert!(session.is_recording());
    }

    #[test]
    fn pause_from_idle_fails() {
        let mut session = CaptureSession::new();
        let err = session.pause().unwrap_err();
        assert_eq!(err.current_state, CaptureState::Idle);
    }

    #[test]
    fn resume_while_recording_fails() {
        let mut session = CaptureSession::new();
        session.start().unwrap();
        assert!(session.resume().is_err());
    }

    #[test]
    fn stop_from_paused() {
        let mut session = CaptureSession::new();
        session.start().unwrap();
        session.pause().unwrap();
        session.stop().unwrap();
        assert!(session.is_idle());
    }

    #[test]
    fn stop_from_idle_fails() {
        let mut session = CaptureSession::new();
        assert!(session.stop().is_err());
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: CaptureState::Paused,
            action: "pause".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid state transition: cannot pause while paused"
        );
    }
}
