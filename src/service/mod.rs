//! Download job service abstraction.
//!
//! Provides the `JobService` trait the session controller talks to, the wire
//! types of the service's JSON API, and `HttpJobService`, the reqwest-backed
//! implementation. Tests substitute their own `JobService` to script responses.

pub mod http;
pub mod types;

use crate::core::error::AppResult;
use async_trait::async_trait;
use url::Url;

pub use http::HttpJobService;
pub use types::{
    JobId, JobStatus, ProgressSnapshot, QualityOption, StartJobRequest, VideoFormat, VideoInfo, BEST_QUALITY,
};

/// External service that extracts video metadata and runs download jobs.
///
/// Every call is independent; the service keeps the job state, the client only
/// holds the job id.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Human-readable name of this backend (e.g., "http")
    fn name(&self) -> &str;

    /// Fetch metadata for a video URL.
    async fn get_info(&self, url: &str) -> AppResult<VideoInfo>;

    /// Create a download job and return its id.
    async fn start_job(&self, request: &StartJobRequest) -> AppResult<JobId>;

    /// Fetch the current progress of a job.
    async fn get_progress(&self, job_id: &JobId) -> AppResult<ProgressSnapshot>;

    /// Location of the finished artifact for a job.
    fn artifact_url(&self, job_id: &JobId) -> AppResult<Url>;
}
