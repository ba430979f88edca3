//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod config;
pub mod media_index;
pub mod snapshot;

// Re-export common types
pub use capture::{AudioCapture, CaptureError};
pub use config::ConfigStore;
pub use media_index::{ConsentAction, ConsentRequest, MediaError, MediaIndex};
pub use snapshot::{SnapshotError, SnapshotStore};
