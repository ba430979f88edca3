//! Annotation layer: tags, timestamps, groups and the persisted snapshot

mod group;
mod recording_data;
mod snapshot;
mod tag;
mod timestamp;

pub use group::{GroupId, RecordingGroup, GROUP_PALETTE};
pub use recording_data::{RecordingData, UNGROUPED_ORDER};
pub use snapshot::PackagedData;
pub use tag::Tag;
pub use timestamp::TimeStamp;
