//! Configuration value objects

mod app_config;

pub use app_config::{AppConfig, DEFAULT_DATA_FILE, DEFAULT_LIBRARY_SUBDIR};
