//! Session state machine.
//!
//! ```text
//! IDLE --info loaded--> INFO_DISPLAYED --job started--> PROGRESS
//! PROGRESS --downloading--> PROGRESS
//! PROGRESS --finished--> COMPLETE
//! PROGRESS --error / progress unavailable--> ERROR
//! ERROR --reset to info--> INFO_DISPLAYED
//! any --reset to idle--> IDLE
//! ```
//!
//! `transition` is pure: it takes the current state and an event and returns the
//! next state plus the effects the controller has to carry out. It never touches
//! the network, timers or the presenter.

use crate::core::validation::{live_validation_message, ValidationError};
use crate::service::types::{JobId, JobStatus, ProgressSnapshot, VideoInfo};
use crate::session::state::{Busy, DownloadKind, ProgressDisplay, SessionState, TrackedJob, View};

/// Error view text when a job fails without a message.
pub const JOB_FAILED_MESSAGE: &str = "Download failed";

/// Error view text when progress cannot be fetched.
pub const CONNECTION_LOST_MESSAGE: &str = "Connection error while tracking progress";

/// Why a progress request produced no snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollFailure {
    /// Transport or decoding failure
    Connection,
    /// The service refused the request with a message
    Rejected(String),
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The URL field changed
    UrlEdited { url: String },
    /// An info request was refused locally
    InfoRejected { url: String, error: ValidationError },
    /// An info request was sent for a valid URL
    InfoRequested { url: String },
    InfoLoaded { url: String, info: VideoInfo },
    InfoFailed { message: String },
    /// The download type radio changed
    KindSelected(DownloadKind),
    DownloadRequested,
    JobStarted { job_id: JobId },
    JobFailed { message: String },
    /// The polling timer fired for `job_id`
    Tick { job_id: JobId },
    ProgressReceived { job_id: JobId, snapshot: ProgressSnapshot },
    ProgressUnavailable { job_id: JobId, reason: PollFailure },
    /// The user asked for the finished file
    ResultRequested,
    ResetToIdle,
    ResetToInfoView,
}

/// Work the controller performs after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace any polling task with one for this job
    StartPolling(JobId),
    /// Cancel the polling task; no-op when none runs
    StopPolling,
    /// Request a progress snapshot
    FetchProgress(JobId),
    /// Hand the artifact location to the presenter
    OpenArtifact(JobId),
}

/// Result of one transition
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: SessionState, effect: Effect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

/// Computes the next state and effects for `event`.
pub fn transition(mut state: SessionState, event: Event) -> Transition {
    match event {
        Event::UrlEdited { url } => {
            state.url_message = live_validation_message(&url).map(str::to_string);
            state.url_input = url.trim().to_string();
            Transition::to(state)
        }

        Event::InfoRejected { url, error } => {
            state.url_input = url.trim().to_string();
            state.url_message = Some(error.to_string());
            Transition::to(state)
        }

        Event::InfoRequested { .. } | Event::InfoLoaded { .. } if !state.view.accepts_info() => Transition::to(state),

        Event::DownloadRequested | Event::JobStarted { .. } if state.view != View::InfoDisplayed => {
            Transition::to(state)
        }

        Event::InfoRequested { url } => {
            state.url_input = url.trim().to_string();
            state.url_message = None;
            state.busy = Some(Busy::FetchingInfo);
            Transition::to(state)
        }

        Event::InfoLoaded { url, info } => {
            state.url_input = url.trim().to_string();
            state.busy = None;
            state.view = View::InfoDisplayed;
            state.info = Some(info);
            state.kind = DownloadKind::Video;
            state.quality_visible = true;
            state.inline_error = None;
            Transition::to(state)
        }

        Event::InfoFailed { message } => {
            state.busy = None;
            state.url_message = Some(message);
            Transition::to(state)
        }

        Event::KindSelected(kind) => {
            state.kind = kind;
            state.quality_visible = kind.shows_quality();
            Transition::to(state)
        }

        Event::DownloadRequested => {
            state.busy = Some(Busy::StartingJob);
            state.inline_error = None;
            Transition::to(state)
        }

        Event::JobStarted { job_id } => {
            state.busy = None;
            state.inline_error = None;
            state.error_message = None;
            state.view = View::Progress;
            state.progress = ProgressDisplay::default();
            state.job = Some(TrackedJob {
                id: job_id.clone(),
                terminal: false,
            });
            Transition::with(state, Effect::StartPolling(job_id))
        }

        Event::JobFailed { message } => {
            state.busy = None;
            state.inline_error = Some(message);
            Transition::to(state)
        }

        Event::Tick { job_id } => {
            if state.view == View::Progress && state.is_tracking(&job_id) {
                Transition::with(state, Effect::FetchProgress(job_id))
            } else {
                Transition::to(state)
            }
        }

        Event::ProgressReceived { job_id, snapshot } => {
            if !state.is_tracking(&job_id) {
                return Transition::to(state);
            }
            match snapshot.status {
                JobStatus::Downloading => {
                    state.progress.apply(&snapshot);
                    Transition::to(state)
                }
                JobStatus::Finished => {
                    mark_terminal(&mut state);
                    state.view = View::Complete;
                    Transition::with(state, Effect::StopPolling)
                }
                JobStatus::Error => {
                    let message = snapshot
                        .error
                        .filter(|message| !message.trim().is_empty())
                        .unwrap_or_else(|| JOB_FAILED_MESSAGE.to_string());
                    fail(state, message)
                }
                JobStatus::Pending => Transition::to(state),
            }
        }

        Event::ProgressUnavailable { job_id, reason } => {
            if !state.is_tracking(&job_id) {
                return Transition::to(state);
            }
            let message = match reason {
                PollFailure::Connection => CONNECTION_LOST_MESSAGE.to_string(),
                PollFailure::Rejected(message) => message,
            };
            fail(state, message)
        }

        Event::ResultRequested => match state.job_id().cloned() {
            Some(job_id) => Transition::with(state, Effect::OpenArtifact(job_id)),
            None => Transition::to(state),
        },

        Event::ResetToIdle => Transition::with(SessionState::default(), Effect::StopPolling),

        Event::ResetToInfoView => {
            state.job = None;
            state.busy = None;
            state.error_message = None;
            state.inline_error = None;
            state.progress = ProgressDisplay::default();
            state.view = if state.info.is_some() {
                View::InfoDisplayed
            } else {
                View::Idle
            };
            Transition::with(state, Effect::StopPolling)
        }
    }
}

fn mark_terminal(state: &mut SessionState) {
    if let Some(job) = state.job.as_mut() {
        job.terminal = true;
    }
}

fn fail(mut state: SessionState, message: String) -> Transition {
    mark_terminal(&mut state);
    state.view = View::Error;
    state.error_message = Some(message);
    Transition::with(state, Effect::StopPolling)
}
