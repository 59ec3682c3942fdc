//! Download session: view state, the pure state machine, progress polling and
//! the controller that ties them to a `JobService` and a `Presenter`.

pub mod controller;
pub mod machine;
pub mod poller;
pub mod presenter;
pub mod state;

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::service::types::JobId;

pub use controller::DownloadSessionController;
pub use machine::{transition, Effect, Event, PollFailure, Transition};
pub use poller::{PollTask, PollTick};
pub use presenter::{NullPresenter, PlainTextFormatter, Presenter, StateFormatter};
pub use state::{Busy, DownloadKind, ProgressDisplay, SessionState, TrackedJob, View};

/// Job currently owned by a controller together with its polling task.
///
/// Dropping the session aborts the task.
#[derive(Debug)]
pub struct Session {
    job_id: JobId,
    poller: PollTask,
}

impl Session {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            poller: PollTask::idle(),
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Starts (or restarts) ticking for this session's job.
    pub fn start_polling(&mut self, interval: Duration, ticks: UnboundedSender<PollTick>) {
        self.poller.start(self.job_id.clone(), interval, ticks);
    }

    /// Stops the polling task; false when it was not running.
    pub fn stop_polling(&mut self) -> bool {
        self.poller.stop()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }
}
