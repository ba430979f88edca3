//! Media index adapters

mod fs_index;

pub use fs_index::{FsMediaIndex, AUDIO_EXTENSIONS};
