//! Recording facts: identifiers, durations and day bucketing

mod duration;
mod recording;

pub use duration::Duration;
pub use recording::{group_by_day, human_readable_size, Recording, RecordingId, RecordingKey};
