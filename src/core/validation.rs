//! URL validation for the download form
//!
//! Accepts the two canonical YouTube shapes the job service understands:
//! - `youtube.com/watch?v=<id>` with optional trailing `&...` parameters
//! - `youtu.be/<id>` with optional trailing `?...` or `&...` parameters
//!
//! Both may carry an optional `http://`/`https://` scheme and an optional `www.`.
//! The video id is exactly 11 characters of `[A-Za-z0-9_-]`.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Message shown when the field is submitted empty.
pub const EMPTY_URL_MESSAGE: &str = "Please enter a YouTube URL";

/// Message shown when the field holds something that is not a YouTube URL.
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid YouTube URL";

static WATCH_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([A-Za-z0-9_-]{11})(?:&.*)?$")
        .expect("Failed to compile watch URL regex")
});

static SHORT_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?youtu\.be/([A-Za-z0-9_-]{11})(?:[?&].*)?$")
        .expect("Failed to compile short URL regex")
});

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing was entered
    #[error("Please enter a YouTube URL")]
    EmptyUrl,

    /// Input does not match any accepted YouTube URL shape
    #[error("Please enter a valid YouTube URL")]
    InvalidUrl,
}

/// Returns true if `url` matches one of the accepted YouTube URL shapes.
///
/// The input is trimmed first; an empty string is not a valid URL.
///
/// # Examples
/// ```
/// use vidfetch::core::validation::is_valid_youtube_url;
///
/// assert!(is_valid_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=5s"));
/// assert!(is_valid_youtube_url("https://youtu.be/dQw4w9WgXcQ"));
/// assert!(!is_valid_youtube_url("not a url"));
/// ```
pub fn is_valid_youtube_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && (WATCH_URL_REGEX.is_match(url) || SHORT_URL_REGEX.is_match(url))
}

/// Validates form input, distinguishing an empty field from a malformed URL.
pub fn validate_youtube_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if is_valid_youtube_url(url) {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl)
    }
}

/// Message to show under the URL field while the user is typing.
///
/// Empty and valid input both clear the message.
pub fn live_validation_message(url: &str) -> Option<&'static str> {
    let url = url.trim();
    if url.is_empty() || is_valid_youtube_url(url) {
        None
    } else {
        Some(INVALID_URL_MESSAGE)
    }
}

/// Extracts the 11-character video id from an accepted URL.
pub fn extract_video_id(url: &str) -> Option<&str> {
    let url = url.trim();
    WATCH_URL_REGEX
        .captures(url)
        .or_else(|| SHORT_URL_REGEX.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
