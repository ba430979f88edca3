//! JSON file snapshot store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::{SnapshotError, SnapshotStore};
use crate::domain::library::PackagedData;

/// Stores the snapshot as one pretty-printed JSON document.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a crash mid-write leaves the previous snapshot intact.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "library.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load(&self) -> Result<PackagedData, SnapshotError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot yet");
                return Ok(PackagedData::empty());
            }
            Err(e) => return Err(SnapshotError::ReadFailed(e.to_string())),
        };

        if content.trim().is_empty() {
            return Ok(PackagedData::empty());
        }
        PackagedData::from_json(&content).map_err(|e| SnapshotError::Corrupt(e.to_string()))
    }

    async fn save(&self, snapshot: &PackagedData) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SnapshotError::WriteFailed(e.to_string()))?;
        }

        let content = snapshot
            .to_json()
            .map_err(|e| SnapshotError::WriteFailed(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, content)
            .await
            .map_err(|e| SnapshotError::WriteFailed(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| SnapshotError::WriteFailed(e.to_string()))?;

        debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}
