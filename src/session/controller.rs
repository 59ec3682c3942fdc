//! Download session controller.
//!
//! Owns the view state and the active [`Session`]. Every user action and every
//! service response is turned into an [`Event`], run through [`transition`], and
//! the resulting effects are carried out here: polling is started or stopped,
//! progress is requested, and the presenter is asked to redraw.
//!
//! The controller is driven through `&mut self`, so at most one request is in
//! flight at a time. Polling ticks arrive on a channel and are consumed with
//! [`DownloadSessionController::next_tick`] / [`DownloadSessionController::poll_tick`],
//! or all at once with [`DownloadSessionController::run_until_settled`].

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use url::Url;

use crate::core::config::ClientConfig;
use crate::core::error::{AppError, AppResult};
use crate::core::validation::{is_valid_youtube_url, validate_youtube_url};
use crate::service::types::{JobId, JobStatus, StartJobRequest, VideoInfo};
use crate::service::JobService;
use crate::session::machine::{transition, Effect, Event, PollFailure, Transition};
use crate::session::poller::PollTick;
use crate::session::presenter::Presenter;
use crate::session::state::{DownloadKind, SessionState, View};
use crate::session::Session;

/// Drives one download page against a job service.
pub struct DownloadSessionController {
    service: Arc<dyn JobService>,
    presenter: Box<dyn Presenter>,
    poll_interval: Duration,
    state: SessionState,
    session: Option<Session>,
    ticks_tx: UnboundedSender<PollTick>,
    ticks_rx: UnboundedReceiver<PollTick>,
}

impl DownloadSessionController {
    /// Creates a controller in the IDLE view and draws it once.
    pub fn new(service: Arc<dyn JobService>, presenter: Box<dyn Presenter>, config: &ClientConfig) -> Self {
        let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
        let mut controller = Self {
            service,
            presenter,
            poll_interval: config.poll_interval,
            state: SessionState::default(),
            session: None,
            ticks_tx,
            ticks_rx,
        };
        controller.presenter.render(&controller.state);
        controller
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.state.view
    }

    /// Id of the job the session holds, if any
    pub fn job_id(&self) -> Option<&JobId> {
        self.session.as_ref().map(Session::job_id)
    }

    /// Whether a polling task is currently running
    pub fn is_polling(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_polling)
    }

    /// Live validation of the URL field.
    ///
    /// Returns true iff `url` is a recognised YouTube URL. The validation
    /// message is set for invalid input and cleared for valid or empty input.
    pub fn validate_input(&mut self, url: &str) -> bool {
        self.dispatch(Event::UrlEdited { url: url.to_string() });
        is_valid_youtube_url(url)
    }

    /// Fetches video details and switches to the info view.
    ///
    /// Invalid input is rejected without a request. Failures leave the view as it
    /// was and show the message under the URL field. Only available from IDLE and
    /// INFO_DISPLAYED; a running or settled job has to be reset first.
    pub async fn fetch_video_info(&mut self, url: &str) -> AppResult<VideoInfo> {
        self.ensure_view("load video info", View::accepts_info)?;

        let url = url.trim();
        if let Err(error) = validate_youtube_url(url) {
            self.dispatch(Event::InfoRejected {
                url: url.to_string(),
                error: error.clone(),
            });
            return Err(error.into());
        }

        self.dispatch(Event::InfoRequested { url: url.to_string() });
        log::debug!("Requesting video info for {} via {}", url, self.service.name());

        match self.service.get_info(url).await {
            Ok(info) => {
                log::info!("Got video info: {} ({} formats)", info.title, info.formats.len());
                self.dispatch(Event::InfoLoaded {
                    url: url.to_string(),
                    info: info.clone(),
                });
                Ok(info)
            }
            Err(e) => {
                log::warn!("Video info request failed [{}]: {}", e.category(), e);
                self.dispatch(Event::InfoFailed { message: e.to_string() });
                Err(e)
            }
        }
    }

    /// Shows quality selection for video downloads and hides it for audio.
    pub fn toggle_quality_visibility(&mut self, kind: DownloadKind) {
        self.dispatch(Event::KindSelected(kind));
    }

    /// Creates a download job and starts tracking it.
    ///
    /// Only available from INFO_DISPLAYED. On failure the view stays where it was
    /// and the message is shown next to the download control; an invalid URL is
    /// reported under the URL field instead.
    pub async fn start_download(&mut self, url: &str, quality: &str, audio_only: bool) -> AppResult<JobId> {
        self.ensure_view("start a download", |view| view == View::InfoDisplayed)?;

        let url = url.trim();
        if let Err(error) = validate_youtube_url(url) {
            self.dispatch(Event::InfoRejected {
                url: url.to_string(),
                error: error.clone(),
            });
            return Err(error.into());
        }

        let request = StartJobRequest {
            url: url.to_string(),
            quality: quality.to_string(),
            audio_only,
        };

        self.dispatch(Event::DownloadRequested);
        match self.service.start_job(&request).await {
            Ok(job_id) => {
                log::info!(
                    "Started job {} (quality: {}, audio only: {})",
                    job_id,
                    request.quality,
                    request.audio_only
                );
                self.dispatch(Event::JobStarted { job_id: job_id.clone() });
                Ok(job_id)
            }
            Err(e) => {
                log::warn!("Job start failed [{}]: {}", e.category(), e);
                self.dispatch(Event::JobFailed { message: e.to_string() });
                Err(e)
            }
        }
    }

    /// Waits for the next polling tick.
    ///
    /// Returns `None` right away when no polling task runs, so callers never
    /// wait on a session that has settled.
    pub async fn next_tick(&mut self) -> Option<PollTick> {
        if !self.is_polling() {
            return None;
        }
        self.ticks_rx.recv().await
    }

    /// Handles one polling tick: requests progress for the tracked job and
    /// applies the result. Ticks for other jobs are ignored.
    pub async fn poll_tick(&mut self, tick: PollTick) {
        let effects = self.dispatch(Event::Tick { job_id: tick.job_id });

        for effect in effects {
            let Effect::FetchProgress(job_id) = effect else {
                continue;
            };

            let event = match self.service.get_progress(&job_id).await {
                Ok(snapshot) => {
                    match snapshot.status {
                        JobStatus::Finished => log::info!("Job {} finished", job_id),
                        JobStatus::Error => log::warn!(
                            "Job {} failed: {}",
                            job_id,
                            snapshot.error.as_deref().unwrap_or("no message")
                        ),
                        _ => log::debug!("Job {}: {:?} {}%", job_id, snapshot.status, snapshot.percent),
                    }
                    Event::ProgressReceived { job_id, snapshot }
                }
                Err(e) => {
                    log::warn!("Progress request for job {} failed [{}]: {}", job_id, e.category(), e);
                    let reason = if e.is_network() {
                        PollFailure::Connection
                    } else {
                        PollFailure::Rejected(e.to_string())
                    };
                    Event::ProgressUnavailable { job_id, reason }
                }
            };
            self.dispatch(event);
        }
    }

    /// Polls until the session stops polling (COMPLETE, ERROR or a reset) and
    /// returns the view it settled in.
    pub async fn run_until_settled(&mut self) -> View {
        while let Some(tick) = self.next_tick().await {
            self.poll_tick(tick).await;
        }
        self.view()
    }

    /// Hands the artifact location of the session's job to the presenter.
    ///
    /// Returns `Ok(None)` when no job is held.
    pub fn fetch_result_file(&mut self) -> AppResult<Option<Url>> {
        let effects = self.dispatch(Event::ResultRequested);

        for effect in effects {
            if let Effect::OpenArtifact(job_id) = effect {
                let url = self.service.artifact_url(&job_id)?;
                log::info!("Artifact for job {}: {}", job_id, url);
                self.presenter.open_artifact(&url);
                return Ok(Some(url));
            }
        }
        Ok(None)
    }

    /// Drops the session and returns to the empty IDLE view.
    pub fn reset_to_idle(&mut self) {
        self.dispatch(Event::ResetToIdle);
    }

    /// Drops the job and returns to the stored video details (IDLE when none).
    pub fn reset_to_info_view(&mut self) {
        self.dispatch(Event::ResetToInfoView);
    }

    /// Refuses `action` unless the current view allows it. A job that is still
    /// being polled always reports `DownloadInProgress`.
    fn ensure_view(&self, action: &'static str, allowed: impl Fn(View) -> bool) -> AppResult<()> {
        if self.state.wants_polling() {
            return Err(AppError::DownloadInProgress);
        }
        if !allowed(self.state.view) {
            log::warn!("Refusing to {} from the {} view", action, self.state.view.as_str());
            return Err(AppError::InvalidTransition {
                action,
                view: self.state.view.as_str(),
            });
        }
        Ok(())
    }

    /// Applies `event`, performs the polling effects, redraws, and returns the
    /// effects that need the service.
    fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        let previous = self.state.view;
        let Transition { state, effects } = transition(std::mem::take(&mut self.state), event);
        self.state = state;

        if previous != self.state.view {
            log::debug!("Session view {} -> {}", previous.as_str(), self.state.view.as_str());
        }

        let mut pending = Vec::new();
        for effect in effects {
            match effect {
                Effect::StartPolling(job_id) => {
                    let mut session = Session::new(job_id);
                    session.start_polling(self.poll_interval, self.ticks_tx.clone());
                    // Replacing the old session aborts its task.
                    self.session = Some(session);
                }
                Effect::StopPolling => {
                    if let Some(session) = self.session.as_mut() {
                        if session.stop_polling() {
                            log::debug!("Stopped polling job {}", session.job_id());
                        }
                    }
                }
                other => pending.push(other),
            }
        }

        if self.state.job.is_none() {
            self.session = None;
        }

        self.presenter.render(&self.state);
        pending
    }
}
