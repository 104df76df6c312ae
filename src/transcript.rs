//! Transcript data model and output rendering.
//!
//! A [`Transcript`] is the ordered list of caption entries for one video. This
//! module turns it into the two on-disk formats (timestamped text and JSON)
//! and into the short preview shown in verbose mode.

use serde::{Deserialize, Serialize};

/// Number of entries shown in the verbose preview.
pub const PREVIEW_LEN: usize = 3;

/// One caption unit: text plus its start time and duration in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl TranscriptEntry {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// Render as `[timestamp] text`.
    pub fn to_timestamped_line(&self) -> String {
        format!("[{}] {}", format_timestamp(self.start), self.text)
    }
}

/// Caption entries in playback order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new(entries: Vec<TranscriptEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newline-joined `[timestamp] text` lines, no trailing newline.
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(TranscriptEntry::to_timestamped_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Newline-joined bare text lines, no trailing newline.
    pub fn to_plain_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// JSON array of `{text, start, duration}` objects.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Preview lines for verbose mode: the first few entries with
    /// timestamps, followed by a count of the rest when there are more.
    pub fn preview(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .take(PREVIEW_LEN)
            .map(TranscriptEntry::to_timestamped_line)
            .collect();

        if self.len() > PREVIEW_LEN {
            lines.push(format!("... and {} more entries", self.len() - PREVIEW_LEN));
        }

        lines
    }
}

/// Format seconds as `MM:SS`, or `HH:MM:SS` once an hour is reached.
///
/// Fractional seconds are truncated. Negative or non-finite input renders as
/// zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
