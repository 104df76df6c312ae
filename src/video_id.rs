//! Video ID extraction from YouTube URLs.
//!
//! Recognized shapes:
//! - `https://www.youtube.com/watch?v=VIDEO_ID`
//! - `https://youtu.be/VIDEO_ID`
//! - `https://www.youtube.com/embed/VIDEO_ID`
//! - `https://www.youtube.com/v/VIDEO_ID`

use crate::error::ExtractError;
use regex::Regex;
use std::sync::LazyLock;

static VIDEO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)([a-zA-Z0-9_-]{11})",
    )
    .unwrap()
});

/// Extract the 11-character video ID from a URL-like string.
///
/// # Errors
///
/// Returns `ExtractError::InvalidUrl` if no supported URL shape is found.
pub fn extract_video_id(url: &str) -> Result<String, ExtractError> {
    VIDEO_ID_REGEX
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractError::InvalidUrl {
            url: url.to_string(),
        })
}
