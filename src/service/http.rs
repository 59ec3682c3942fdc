//! reqwest implementation of the job service client.
//!
//! Endpoints (relative to the configured base URL):
//! - `POST get_info` with `{"url"}`
//! - `POST download` with `{"url", "quality", "audio_only"}`
//! - `GET progress/{id}`
//! - `GET download_file/{id}`
//!
//! Non-success statuses carry `{"error": "..."}` and become `AppError::Service`;
//! connection failures and unreadable bodies become `AppError::Network`.

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::core::config::ClientConfig;
use crate::core::error::{AppError, AppResult};
use crate::service::types::{
    ErrorPayload, InfoRequest, JobId, ProgressSnapshot, StartJobRequest, StartJobResponse, VideoInfo,
};
use crate::service::JobService;

/// Fallback when the info endpoint fails without a message.
pub const INFO_FAILED_MESSAGE: &str = "Failed to get video information";
/// Fallback when the job endpoint fails without a message.
pub const START_FAILED_MESSAGE: &str = "Failed to start download";
/// Fallback when the progress endpoint fails without a message.
pub const PROGRESS_FAILED_MESSAGE: &str = "Failed to get download progress";
/// Fallback when the artifact endpoint fails without a message.
pub const ARTIFACT_FAILED_MESSAGE: &str = "File not ready or not found";

/// Job service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpJobService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpJobService {
    /// Builds a client with the configured base URL and request timeout.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Network(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.service_url.clone(),
        })
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Streams the finished artifact of `job_id` into `path`.
    ///
    /// Returns the number of bytes written.
    pub async fn save_artifact(&self, job_id: &JobId, path: &Path) -> AppResult<u64> {
        let url = self.artifact_url(job_id)?;
        log::info!("Fetching artifact for job {} from {}", job_id, url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(service_error(response, ARTIFACT_FAILED_MESSAGE).await);
        }

        let written = write_stream_to_file(response.bytes_stream(), path).await?;
        log::info!("Saved {} bytes to {}", written, path.display());
        Ok(written)
    }
}

/// Writes every chunk of `stream` to `path`.
///
/// A transfer that fails after the file was created removes the partial file.
async fn write_stream_to_file<S, B, E>(stream: S, path: &Path) -> AppResult<u64>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    AppError: From<E>,
{
    futures_util::pin_mut!(stream);
    let mut file = tokio::fs::File::create(path).await?;

    let result = async {
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(chunk.as_ref()).await?;
            written += chunk.as_ref().len() as u64;
        }
        file.flush().await?;
        Ok::<u64, AppError>(written)
    }
    .await;

    if let Err(e) = &result {
        log::warn!("Transfer to {} failed, removing partial file: {}", path.display(), e);
        drop(file);
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            log::warn!("Failed to remove {}: {}", path.display(), remove_err);
        }
    }
    result
}

/// Reads a JSON body on success, or turns an error payload into `AppError::Service`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response, fallback: &str) -> AppResult<T> {
    if response.status().is_success() {
        Ok(response.json::<T>().await?)
    } else {
        Err(service_error(response, fallback).await)
    }
}

async fn service_error(response: reqwest::Response, fallback: &str) -> AppError {
    let status = response.status();
    let payload = response.json::<ErrorPayload>().await.unwrap_or_default();
    let message = payload
        .error
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    log::warn!("Service responded with {}: {}", status, message);
    AppError::service(message)
}

#[async_trait]
impl JobService for HttpJobService {
    fn name(&self) -> &str {
        "http"
    }

    async fn get_info(&self, url: &str) -> AppResult<VideoInfo> {
        let endpoint = self.endpoint(&["get_info"])?;
        let response = self.client.post(endpoint).json(&InfoRequest { url }).send().await?;
        read_json(response, INFO_FAILED_MESSAGE).await
    }

    async fn start_job(&self, request: &StartJobRequest) -> AppResult<JobId> {
        let endpoint = self.endpoint(&["download"])?;
        let response = self.client.post(endpoint).json(request).send().await?;
        let started: StartJobResponse = read_json(response, START_FAILED_MESSAGE).await?;
        if let Some(message) = &started.message {
            log::debug!("Service accepted job {}: {}", started.download_id, message);
        }
        Ok(started.download_id)
    }

    async fn get_progress(&self, job_id: &JobId) -> AppResult<ProgressSnapshot> {
        let endpoint = self.endpoint(&["progress", job_id.as_str()])?;
        let response = self.client.get(endpoint).send().await?;
        read_json(response, PROGRESS_FAILED_MESSAGE).await
    }

    fn artifact_url(&self, job_id: &JobId) -> AppResult<Url> {
        self.endpoint(&["download_file", job_id.as_str()])
    }
}
