//! Shared sample data

#![allow(dead_code)]

use std::time::Duration;

use vidfetch::core::ClientConfig;
use vidfetch::service::{JobStatus, ProgressSnapshot, VideoInfo};

pub const VALID_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// Config with a fast poll cadence so flows settle quickly
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url)
        .expect("valid base url")
        .with_poll_interval(Duration::from_millis(10))
        .with_request_timeout(Duration::from_secs(5))
}

pub fn sample_info() -> VideoInfo {
    serde_json::from_value(serde_json::json!({
        "title": "Never Gonna Give You Up",
        "uploader": "Rick Astley",
        "view_count": 1_234_567u64,
        "duration": 213,
        "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg",
        "formats": [
            {"quality": "1080p", "ext": "mp4"},
            {"quality": "720p", "ext": "mp4"}
        ]
    }))
    .expect("valid info")
}

pub fn snapshot(status: JobStatus, percent: f64) -> ProgressSnapshot {
    ProgressSnapshot::new(status, percent)
}
