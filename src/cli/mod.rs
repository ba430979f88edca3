//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, the command handlers
//! and the main application runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod error;
pub mod group_cmd;
pub mod library_cmd;
pub mod presenter;
pub mod tag_cmd;

// Re-export commonly used types
pub use app::run;
pub use args::{Cli, Commands, ConfigAction, GroupAction, MarkAction, TagAction};
pub use error::{CliError, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use presenter::Presenter;
