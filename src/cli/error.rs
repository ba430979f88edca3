//! CLI error type and exit codes

use thiserror::Error;

use crate::application::LibraryError;
use crate::domain::error::{ConfigError, DurationParseError};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Errors reported by command handlers
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No recording named \"{0}\"")]
    UnknownRecording(String),

    #[error("No group named \"{0}\"")]
    UnknownGroup(String),

    #[error("{0}")]
    InvalidTime(#[from] DurationParseError),

    #[error("{0} recording(s) could not be deleted")]
    DeleteFailed(usize),

    #[error("{0}")]
    Library(#[from] LibraryError),

    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidTime(_) | Self::Config(ConfigError::ValidationError { .. }) => {
                EXIT_USAGE_ERROR
            }
            _ => EXIT_ERROR,
        }
    }
}
