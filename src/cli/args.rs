//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};

/// AudioShelf - tag, group, timestamp and search your recordings
#[derive(Parser, Debug)]
#[command(name = "audio-shelf")]
#[command(version)]
#[command(about = "Tag, group, timestamp and fuzzy-search a directory of audio recordings")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory holding the recordings
    #[arg(short = 'l', long, value_name = "DIR", global = true)]
    pub library: Option<String>,

    /// Snapshot file holding tags, groups and timestamps
    #[arg(long, value_name = "FILE", global = true)]
    pub data: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    pub config_file: Option<String>,

    /// Log debug output to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recordings, newest first
    List {
        /// Group the listing into day sections
        #[arg(long)]
        by_day: bool,
    },
    /// Show one recording with its annotations
    Show {
        /// Recording name or URI
        recording: String,
    },
    /// Remove annotations of vanished recordings and report what changed
    Verify,
    /// Fuzzy search over recordings, timestamps and groups
    Search(SearchArgs),
    /// Change a recording's name and description
    Edit {
        /// Recording name or URI
        recording: String,
        /// New name (the file is renamed)
        #[arg(short, long)]
        title: Option<String>,
        /// New description; an empty string clears it
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete recordings and their annotations
    Delete {
        /// Recording names or URIs
        #[arg(required = true)]
        recordings: Vec<String>,
    },
    /// Manage tags
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Manage groups
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },
    /// Manage timestamps inside recordings
    Mark {
        #[command(subcommand)]
        action: MarkAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Search arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to search for; may be empty when filtering by tag
    #[arg(default_value = "")]
    pub query: String,

    /// Only consider recordings carrying this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Minimum score (0-100) a result needs
    #[arg(long, value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,
}

/// Tag actions
#[derive(Subcommand, Debug)]
pub enum TagAction {
    /// Attach a tag to one or more recordings
    Add {
        tag: String,
        /// Recording names or URIs
        #[arg(required = true)]
        recordings: Vec<String>,
    },
    /// Detach a tag from a recording
    Rm { tag: String, recording: String },
    /// List the tag registry
    List,
}

/// Group actions
#[derive(Subcommand, Debug)]
pub enum GroupAction {
    /// Create a group
    Create {
        name: String,
        /// Image URI shown for the group
        #[arg(long)]
        image: Option<String>,
        /// Fallback color, e.g. #5E81AC
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename a group or change its image
    Edit {
        /// Group name or UUID
        group: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a group; its recordings stay in the library
    Delete { group: String },
    /// Append recordings to a group
    Add {
        group: String,
        /// Recording names or URIs
        #[arg(required = true)]
        recordings: Vec<String>,
    },
    /// Take a recording out of its group
    Remove { recording: String },
    /// Renumber a group's members densely
    Order { group: String },
    /// Show a group's members in order
    Show { group: String },
    /// List groups
    List,
}

/// Timestamp actions
#[derive(Subcommand, Debug)]
pub enum MarkAction {
    /// Add a timestamp
    Add {
        recording: String,
        /// Offset into the recording (e.g. 1:30, 90s, 1m30s)
        time: String,
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Remove the timestamp at an offset
    Rm { recording: String, time: String },
    /// List a recording's timestamps
    List { recording: String },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["library_dir", "data_file", "search_threshold"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
