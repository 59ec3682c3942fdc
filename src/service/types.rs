//! Wire types exchanged with the download job service.
//!
//! The service is lenient about numbers: counts arrive as integers, floats
//! (yt-dlp byte estimates) or `null`. Numeric fields accept any of these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a server-side download job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One downloadable format offered for a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFormat {
    /// Quality label, e.g. "1080p"
    pub quality: String,
    /// Container extension, e.g. "mp4"
    #[serde(default = "default_ext")]
    pub ext: String,
    #[serde(default)]
    pub format_id: Option<String>,
    /// Size in bytes when the service knows it
    #[serde(default, deserialize_with = "number::opt_u64")]
    pub filesize: Option<u64>,
}

/// Video metadata returned by the info endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default = "unknown_uploader")]
    pub uploader: String,
    #[serde(default, deserialize_with = "number::u64_or_zero")]
    pub view_count: u64,
    /// Duration in seconds
    #[serde(default, deserialize_with = "number::u64_or_zero")]
    pub duration: u64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub formats: Vec<VideoFormat>,
}

/// Entry of the quality picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityOption {
    /// Value sent to the service as `quality`
    pub value: String,
    /// Label shown to the user
    pub label: String,
}

/// Quality value that lets the service pick the best available format.
pub const BEST_QUALITY: &str = "best";

impl VideoInfo {
    /// Options for the quality picker: "Best Quality" first, then every format
    /// as "<quality> (<EXT>)" in the order the service listed them.
    pub fn quality_options(&self) -> Vec<QualityOption> {
        std::iter::once(QualityOption {
            value: BEST_QUALITY.to_string(),
            label: "Best Quality".to_string(),
        })
        .chain(self.formats.iter().map(|format| QualityOption {
            value: format.quality.clone(),
            label: format!("{} ({})", format.quality, format.ext.to_uppercase()),
        }))
        .collect()
    }

    /// Whether `quality` is one of the values offered by `quality_options`.
    pub fn offers_quality(&self, quality: &str) -> bool {
        self.quality_options().iter().any(|option| option.value == quality)
    }
}

/// Status of a job as reported by the progress endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Downloading,
    #[serde(alias = "completed")]
    Finished,
    Error,
    /// Anything else the service reports ("starting", "queued", "not_found")
    #[serde(other)]
    Pending,
}

/// One polled progress observation for a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub status: JobStatus,
    /// Completion in percent, 0-100
    #[serde(default, deserialize_with = "number::f64_or_zero")]
    pub percent: f64,
    /// Bytes per second
    #[serde(default)]
    pub speed: Option<f64>,
    /// Seconds remaining
    #[serde(default, deserialize_with = "number::opt_u64")]
    pub eta: Option<u64>,
    #[serde(default, deserialize_with = "number::opt_u64")]
    pub downloaded: Option<u64>,
    #[serde(default, deserialize_with = "number::opt_u64")]
    pub total: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl ProgressSnapshot {
    /// A bare snapshot with the given status and percent, other fields absent.
    pub fn new(status: JobStatus, percent: f64) -> Self {
        Self {
            status,
            percent,
            speed: None,
            eta: None,
            downloaded: None,
            total: None,
            error: None,
            filename: None,
        }
    }

    /// Speed if the service reported a non-zero value
    pub fn speed(&self) -> Option<f64> {
        self.speed.filter(|speed| speed.is_finite() && *speed > 0.0)
    }

    /// ETA if the service reported a non-zero value
    pub fn eta(&self) -> Option<u64> {
        self.eta.filter(|eta| *eta > 0)
    }

    /// Downloaded and total bytes, only when both are known and non-zero
    pub fn byte_counts(&self) -> Option<(u64, u64)> {
        match (self.downloaded, self.total) {
            (Some(downloaded), Some(total)) if downloaded > 0 && total > 0 => Some((downloaded, total)),
            _ => None,
        }
    }
}

/// Body of the info request
#[derive(Debug, Clone, Serialize)]
pub struct InfoRequest<'a> {
    pub url: &'a str,
}

/// Body of the job creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartJobRequest {
    pub url: String,
    pub quality: String,
    pub audio_only: bool,
}

/// Successful job creation response
#[derive(Debug, Clone, Deserialize)]
pub struct StartJobResponse {
    pub download_id: JobId,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the service sends with non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
}

fn default_ext() -> String {
    "mp4".to_string()
}

fn unknown_title() -> String {
    "Unknown Title".to_string()
}

fn unknown_uploader() -> String {
    "Unknown".to_string()
}

mod number {
    use serde::{Deserialize, Deserializer};

    fn to_u64(number: serde_json::Number) -> Option<u64> {
        number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .map(|value| value.round() as u64)
        })
    }

    pub fn opt_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        Ok(Option::<serde_json::Number>::deserialize(deserializer)?.and_then(to_u64))
    }

    pub fn u64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        Ok(opt_u64(deserializer)?.unwrap_or(0))
    }

    pub fn f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?
            .filter(|value| value.is_finite())
            .unwrap_or(0.0))
    }
}
