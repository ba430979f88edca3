//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::search::DEFAULT_SEARCH_THRESHOLD;

/// Default directory scanned for recordings, relative to the audio dir
pub const DEFAULT_LIBRARY_SUBDIR: &str = "Recordings";

/// Default snapshot file name inside the library dir
pub const DEFAULT_DATA_FILE: &str = ".audio-shelf.json";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub library_dir: Option<String>,
    pub data_file: Option<String>,
    pub search_threshold: Option<u8>,
}

impl AppConfig {
    /// Create config with default values.
    ///
    /// `data_file` stays unset so it follows whichever library is in use.
    pub fn defaults() -> Self {
        Self {
            library_dir: Some(default_library_dir().to_string_lossy().to_string()),
            data_file: None,
            search_threshold: Some(DEFAULT_SEARCH_THRESHOLD),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            library_dir: other.library_dir.or(self.library_dir),
            data_file: other.data_file.or(self.data_file),
            search_threshold: other.search_threshold.or(self.search_threshold),
        }
    }

    /// Directory holding the recordings
    pub fn library_dir_or_default(&self) -> PathBuf {
        self.library_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_library_dir)
    }

    /// Snapshot file path. Without an explicit file, each library keeps
    /// its snapshot inside its own directory.
    pub fn data_file_or_default(&self) -> PathBuf {
        self.data_file
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.library_dir_or_default().join(DEFAULT_DATA_FILE))
    }

    /// Search threshold, capped at 100
    pub fn search_threshold_or_default(&self) -> u8 {
        self.search_threshold
            .unwrap_or(DEFAULT_SEARCH_THRESHOLD)
            .min(100)
    }
}

fn default_library_dir() -> PathBuf {
    dirs::audio_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_LIBRARY_SUBDIR)
}
