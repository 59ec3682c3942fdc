//! Scripted job service
//!
//! Responses are queued per endpoint and handed out in order. Every call is
//! recorded so tests can assert on what the controller asked for.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use url::Url;

use vidfetch::core::{AppError, AppResult};
use vidfetch::service::{JobId, JobService, JobStatus, ProgressSnapshot, StartJobRequest, VideoInfo};

/// A request the controller made
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    GetInfo(String),
    StartJob(StartJobRequest),
    GetProgress(JobId),
}

#[derive(Default)]
pub struct MockJobService {
    info: Mutex<VecDeque<AppResult<VideoInfo>>>,
    starts: Mutex<VecDeque<AppResult<JobId>>>,
    progress: Mutex<VecDeque<AppResult<ProgressSnapshot>>>,
    calls: Mutex<Vec<ServiceCall>>,
}

impl MockJobService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_info(&self, response: AppResult<VideoInfo>) -> &Self {
        self.info.lock().unwrap().push_back(response);
        self
    }

    pub fn push_start(&self, response: AppResult<JobId>) -> &Self {
        self.starts.lock().unwrap().push_back(response);
        self
    }

    pub fn push_progress(&self, response: AppResult<ProgressSnapshot>) -> &Self {
        self.progress.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Job ids of every progress request, in order
    pub fn progress_requests(&self) -> Vec<JobId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ServiceCall::GetProgress(job_id) => Some(job_id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ServiceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl JobService for MockJobService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_info(&self, url: &str) -> AppResult<VideoInfo> {
        self.record(ServiceCall::GetInfo(url.to_string()));
        self.info
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Network("no scripted info response".to_string())))
    }

    async fn start_job(&self, request: &StartJobRequest) -> AppResult<JobId> {
        self.record(ServiceCall::StartJob(request.clone()));
        self.starts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Network("no scripted start response".to_string())))
    }

    /// Unscripted progress requests report a job that has not started yet.
    async fn get_progress(&self, job_id: &JobId) -> AppResult<ProgressSnapshot> {
        self.record(ServiceCall::GetProgress(job_id.clone()));
        self.progress
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ProgressSnapshot::new(JobStatus::Pending, 0.0)))
    }

    fn artifact_url(&self, job_id: &JobId) -> AppResult<Url> {
        Ok(Url::parse(&format!("http://mock.local/download_file/{}", job_id))?)
    }
}
