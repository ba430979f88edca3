//! Duration value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use serde::{Deserialize, Serialize};

use crate::domain::error::DurationParseError;

/// Value object representing a time offset or length in milliseconds.
/// Used both for recording lengths and for timestamp offsets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    pub const ZERO: Self = Self::from_millis(0);

    /// Create a Duration from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Get duration in seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Get duration in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }

    fn parse_unit_form(input: &str, original: &str) -> Result<u64, DurationParseError> {
        let err = || DurationParseError {
            input: original.to_string(),
        };

        let mut hours: u64 = 0;
        let mut minutes: u64 = 0;
        let mut seconds: u64 = 0;
        let mut current_num = String::new();
        let mut found_any = false;

        for ch in input.chars() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
                continue;
            }
            if current_num.is_empty() {
                return Err(err());
            }
            let value: u64 = current_num.parse().map_err(|_| err())?;
            match ch {
                'h' => hours = value,
                'm' => minutes = value,
                's' => seconds = value,
                _ => return Err(err()),
            }
            current_num.clear();
            found_any = true;
        }

        // Leftover digits without a unit are not accepted
        if !current_num.is_empty() || !found_any {
            return Err(err());
        }

        hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .and_then(|m| m.checked_mul(60))
            .and_then(|s| s.checked_add(seconds))
            .and_then(|s| s.checked_mul(1000))
            .ok_or_else(err)
    }

    fn parse_clock_form(input: &str, original: &str) -> Result<u64, DurationParseError> {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(DurationParseError {
                input: original.to_string(),
            });
        }

        let mut total_secs: u64 = 0;
        for (index, part) in parts.iter().enumerate() {
            let value: u64 = part.parse().map_err(|_| DurationParseError {
                input: original.to_string(),
            })?;
            // Every field after the leading one is base-60
            if index > 0 && value >= 60 {
                return Err(DurationParseError {
                    input: original.to_string(),
                });
            }
            total_secs = total_secs
                .checked_mul(60)
                .and_then(|t| t.checked_add(value))
                .ok_or_else(|| DurationParseError {
                    input: original.to_string(),
                })?;
        }

        total_secs.checked_mul(1000).ok_or_else(|| DurationParseError {
            input: original.to_string(),
        })
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Parse a duration string into a Duration value object.
    /// Supported formats: "30s", "1m", "2m30s", "1h5m", "1:30", "1:02:03"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        if input.is_empty() {
            return Err(DurationParseError { input: s.to_string() });
        }

        let milliseconds = if input.contains(':') {
            Self::parse_clock_form(&input, s)?
        } else {
            Self::parse_unit_form(&input, s)?
        };

        Ok(Self { milliseconds })
    }
}

impl fmt::Display for Duration {
    /// Clock-style rendering: `m:ss`, or `h:mm:ss` past the hour
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;

        if hours == 0 {
            write!(f, "{}:{:02}", minutes, seconds)
        } else {
            write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
        }
    }
}
