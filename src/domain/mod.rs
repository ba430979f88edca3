//! Domain layer - Core business logic
//!
//! Contains value objects, entities, the search ranker and domain errors.
//! This layer has no dependencies on external systems.

pub mod capture;
pub mod config;
pub mod error;
pub mod library;
pub mod recording;
pub mod search;

// Re-export common types
pub use capture::{CaptureSession, CaptureState};
pub use config::AppConfig;
pub use error::*;
pub use library::{GroupId, PackagedData, RecordingData, RecordingGroup, Tag, TimeStamp};
pub use recording::{Duration, Recording, RecordingId, RecordingKey};
pub use search::{SearchHit, SearchQuery, SearchRanker, Searchable};
