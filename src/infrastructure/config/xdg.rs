//! TOML config file for audio-shelf
//!
//! Lives at `<config dir>/audio-shelf/config.toml` unless `--config-file`
//! points elsewhere. It holds `library_dir`, `data_file` and
//! `search_threshold`; keys left out fall back to the built-in defaults.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Directory under the platform config dir
pub const APP_DIR: &str = "audio-shelf";

/// Config file name inside [`APP_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Config store backed by one TOML file
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Store at the platform location, e.g. `~/.config/audio-shelf/config.toml`
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join(APP_DIR);

        Self {
            path: config_dir.join(CONFIG_FILE),
        }
    }

    /// Store at an explicit file, as given by `--config-file`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// An empty or whitespace-only file is an empty config
    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        if content.trim().is_empty() {
            return Ok(AppConfig::empty());
        }
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::empty()),
            Err(e) => {
                return Err(ConfigError::ReadError(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        Self::parse_toml(&content)
    }

    /// Written next to the target first, then renamed over it, so a
    /// failed write leaves the old file intact.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let write_err = |e: std::io::Error| ConfigError::WriteError(e.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let content = Self::to_toml(config)?;
        let temp = self.temp_path();
        fs::write(&temp, content).await.map_err(write_err)?;
        fs::rename(&temp, &self.path).await.map_err(write_err)?;

        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        self.save(&AppConfig::defaults()).await
    }
}
