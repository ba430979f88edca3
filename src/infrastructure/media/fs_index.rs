//! Filesystem media index adapter

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{debug, warn};

use crate::application::ports::{MediaError, MediaIndex};
use crate::domain::recording::{Duration, Recording, RecordingId};

/// File extensions treated as recordings (lowercase)
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "m4a", "mp3", "wav", "ogg", "opus", "flac", "aac", "3gp", "amr", "webm",
];

/// Media index over the audio files of one directory.
///
/// Only the directory itself is scanned, not its subdirectories. The file
/// stem is the recording's name, and its `file://` URI is the identifier.
pub struct FsMediaIndex {
    dir: PathBuf,
}

impl FsMediaIndex {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn is_audio(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
    }

    /// Length of a WAV file from its header. Other formats report zero.
    fn probe_duration(path: &Path) -> Duration {
        let is_wav = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("wav"));
        if !is_wav {
            return Duration::ZERO;
        }

        match hound::WavReader::open(path) {
            Ok(reader) => {
                let spec = reader.spec();
                if spec.sample_rate == 0 {
                    return Duration::ZERO;
                }
                let frames = u64::from(reader.duration());
                Duration::from_millis(frames * 1000 / u64::from(spec.sample_rate))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable WAV header");
                Duration::ZERO
            }
        }
    }

    async fn read_recording(path: PathBuf) -> Result<Option<Recording>, std::io::Error> {
        let metadata = fs::metadata(&path).await?;
        if !metadata.is_file() || !Self::is_audio(&path) {
            return Ok(None);
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let date: DateTime<Utc> = metadata.modified()?.into();

        let probe_path = path.clone();
        let duration = tokio::task::spawn_blocking(move || Self::probe_duration(&probe_path))
            .await
            .unwrap_or(Duration::ZERO);

        Ok(Some(Recording {
            id: RecordingId::from_path(&path),
            name,
            duration,
            size: metadata.len(),
            date,
            path,
        }))
    }

    fn path_of(id: &RecordingId) -> Result<PathBuf, MediaError> {
        id.to_path().ok_or_else(|| MediaError::NotFound(id.clone()))
    }

    fn validate_title(title: &str) -> Result<(), MediaError> {
        let invalid = title.is_empty()
            || title == "."
            || title == ".."
            || title.contains(['/', '\\', '\0']);
        if invalid {
            return Err(MediaError::InvalidName(title.to_string()));
        }
        Ok(())
    }
}

/// Map an I/O failure on a recording to the port's error.
fn map_io(error: std::io::Error, id: &RecordingId) -> MediaError {
    match error.kind() {
        ErrorKind::NotFound => MediaError::NotFound(id.clone()),
        ErrorKind::PermissionDenied => MediaError::ConsentRequired(id.clone()),
        _ => MediaError::Io(error.to_string()),
    }
}

#[async_trait]
impl MediaIndex for FsMediaIndex {
    async fn query(&self) -> Result<Vec<Recording>, MediaError> {
        let dir = fs::canonicalize(&self.dir).await.map_err(|e| {
            MediaError::Unavailable(format!("{}: {}", self.dir.display(), e))
        })?;
        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| MediaError::Unavailable(format!("{}: {}", dir.display(), e)))?;

        let mut recordings = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => return Err(MediaError::Io(e.to_string())),
            };
            let path = entry.path();
            // Identifiers are URI strings, so the path has to round-trip
            if path.to_str().is_none() {
                warn!(path = %path.display(), "skipping file with a non UTF-8 name");
                continue;
            }
            match Self::read_recording(path.clone()).await {
                Ok(Some(recording)) => recordings.push(recording),
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable file"),
            }
        }

        debug!(dir = %dir.display(), count = recordings.len(), "media directory scanned");
        Ok(recordings)
    }

    async fn rename(&self, id: &RecordingId, title: &str) -> Result<RecordingId, MediaError> {
        let title = title.trim();
        Self::validate_title(title)?;

        let from = Self::path_of(id)?;
        let mut file_name = title.to_string();
        if let Some(ext) = from.extension() {
            file_name.push('.');
            file_name.push_str(&ext.to_string_lossy());
        }
        let to = from.with_file_name(file_name);
        if to == from {
            return Ok(id.clone());
        }

        match fs::try_exists(&to).await {
            Ok(true) => return Err(MediaError::NameTaken(title.to_string())),
            Ok(false) => {}
            Err(e) => return Err(map_io(e, id)),
        }

        fs::rename(&from, &to).await.map_err(|e| map_io(e, id))?;
        debug!(from = %from.display(), to = %to.display(), "file renamed");
        Ok(RecordingId::from_path(&to))
    }

    async fn delete(&self, id: &RecordingId) -> Result<(), MediaError> {
        let path = Self::path_of(id)?;
        fs::remove_file(&path).await.map_err(|e| map_io(e, id))?;
        debug!(path = %path.display(), "file deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_wav(path: &Path, seconds: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..(8000 * seconds) {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn names(recordings: &[Recording]) -> Vec<String> {
        let mut names: Vec<String> = recordings.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn query_lists_audio_files_only() {
        let dir = TempDir::new().unwrap();
        write_wav(&dir.path().join("memo.wav"), 2);
        std::fs::write(dir.path().join("song.MP3"), b"not really mp3").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"text").unwrap();
        std::fs::create_dir(dir.path().join("nested.wav")).unwrap();

        let index = FsMediaIndex::new(dir.path());
        let recordings = index.query().await.unwrap();

        assert_eq!(names(&recordings), vec!["memo", "song"]);
        let memo = recordings.iter().find(|r| r.name == "memo").unwrap();
        assert_eq!(memo.duration, Duration::from_secs(2));
        assert!(memo.id.as_str().starts_with("file:///"));
        assert_eq!(memo.id.to_path().unwrap(), memo.path);
        let song = recordings.iter().find(|r| r.name == "song").unwrap();
        assert_eq!(song.duration, Duration::ZERO);
        assert_eq!(song.size, 14);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn query_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("plain.m4a"), b"").unwrap();
        let odd = OsStr::from_bytes(b"caf\xe9.m4a");
        std::fs::write(dir.path().join(odd), b"").unwrap();

        let index = FsMediaIndex::new(dir.path());
        let recordings = index.query().await.unwrap();

        assert_eq!(names(&recordings), vec!["plain"]);
    }

    #[tokio::test]
    async fn missing_directory_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let index = FsMediaIndex::new(dir.path().join("gone"));
        assert!(matches!(
            index.query().await,
            Err(MediaError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn rename_keeps_extension_and_returns_new_id() {
        let dir = TempDir::new().unwrap();
        write_wav(&dir.path().join("memo.wav"), 1);
        let index = FsMediaIndex::new(dir.path());
        let memo = index.query().await.unwrap().remove(0);

        let new_id = index.rename(&memo.id, "Standup").await.unwrap();

        let new_path = new_id.to_path().unwrap();
        assert_eq!(new_path.file_name().unwrap(), "Standup.wav");
        assert!(new_path.exists());
        assert!(!memo.path.exists());
        assert_eq!(names(&index.query().await.unwrap()), vec!["Standup"]);
    }

    #[tokio::test]
    async fn rename_onto_existing_name_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"a").unwrap();
        std::fs::write(dir.path().join("b.mp3"), b"b").unwrap();
        let index = FsMediaIndex::new(dir.path());
        let a = RecordingId::from_path(&dir.path().canonicalize().unwrap().join("a.mp3"));

        assert!(matches!(
            index.rename(&a, "b").await,
            Err(MediaError::NameTaken(_))
        ));
        assert!(matches!(
            index.rename(&a, "../escape").await,
            Err(MediaError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.ogg"), b"a").unwrap();
        let index = FsMediaIndex::new(dir.path());
        let a = index.query().await.unwrap().remove(0);

        index.delete(&a.id).await.unwrap();

        assert!(index.query().await.unwrap().is_empty());
        assert!(matches!(
            index.delete(&a.id).await,
            Err(MediaError::NotFound(_))
        ));
    }

    #[test]
    fn permission_denied_asks_for_consent() {
        let id = RecordingId::new("file:///rec/a.wav");
        let error = std::io::Error::from(ErrorKind::PermissionDenied);
        assert!(matches!(map_io(error, &id), MediaError::ConsentRequired(_)));
    }
}
