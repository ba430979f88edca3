//! Audio capture session

mod session;

pub use session::{CaptureSession, CaptureState, InvalidStateTransition};
