//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;

use crate::domain::library::{RecordingData, RecordingGroup, TimeStamp};
use crate::domain::recording::Recording;
use crate::domain::search::{SearchHit, Searchable};

/// Presenter for CLI output formatting.
///
/// Data goes to stdout, status messages to stderr.
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output many lines to stdout at once
    pub fn output_lines<I, S>(&self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in lines {
            let _ = writeln!(out, "{}", line.as_ref());
        }
    }

    /// Print a section header (day or group)
    pub fn section(&self, title: &str) {
        println!("{}", title.bold().underline());
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// One line per recording: name, length, size, date and tags
    pub fn format_recording(&self, recording: &Recording, data: Option<&RecordingData>) -> String {
        let mut line = format!(
            "{}  {}  {}  {}",
            recording.name.bold(),
            recording.duration,
            recording.size_label(),
            recording.date.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
        if let Some(data) = data.filter(|d| !d.tags.is_empty()) {
            let tags: Vec<String> = data.tags.iter().map(|t| format!("#{}", t)).collect();
            line.push_str("  ");
            line.push_str(&tags.join(" ").cyan().to_string());
        }
        line
    }

    pub fn format_timestamp(&self, timestamp: &TimeStamp) -> String {
        let mut line = format!("{:>8}  {}", timestamp.time_milli.to_string(), timestamp.title);
        if let Some(description) = timestamp.description.as_deref() {
            line.push_str(&format!(" - {}", description.dimmed()));
        }
        line
    }

    pub fn format_group(&self, group: &RecordingGroup, members: usize) -> String {
        format!(
            "{}  {}  {} recording{}",
            group.name.bold(),
            group.fallback_color.dimmed(),
            members,
            if members == 1 { "" } else { "s" }
        )
    }

    pub fn format_hit(&self, hit: &SearchHit<'_>) -> String {
        let label = match hit.item {
            Searchable::Recording(r) => r.name.bold().to_string(),
            Searchable::TimeStamp(t) => format!(
                "{} ({} @ {})",
                t.title.bold(),
                t.recording_name,
                t.time_milli
            ),
            Searchable::Group(g) => g.name.bold().to_string(),
        };
        let kind = format!("[{}]", hit.item.kind());
        match hit.score {
            Some(score) => format!("{:<12} {}  {}", kind, label, score.to_string().dimmed()),
            None => format!("{:<12} {}", kind, label),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
