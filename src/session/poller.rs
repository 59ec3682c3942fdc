//! Periodic progress timer.
//!
//! A `PollTask` owns at most one tokio task that sends a [`PollTick`] for its job
//! every `interval`. The first tick fires one interval after `start`. Starting
//! again replaces the previous task; stopping or dropping aborts it.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::service::types::JobId;

/// Timer notification for one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTick {
    pub job_id: JobId,
}

/// Handle to the polling task of the active job
#[derive(Debug, Default)]
pub struct PollTask {
    handle: Option<JoinHandle<()>>,
}

impl PollTask {
    /// Handle with no running task.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Starts ticking for `job_id`, cancelling whatever ran before.
    pub fn start(&mut self, job_id: JobId, interval: Duration, ticks: UnboundedSender<PollTick>) {
        self.stop();

        let period = interval.max(Duration::from_millis(1));
        log::debug!("Polling job {} every {:?}", job_id, period);

        let handle = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                if ticks.send(PollTick { job_id: job_id.clone() }).is_err() {
                    log::debug!("Tick receiver for job {} is gone, stopping", job_id);
                    break;
                }
            }
        });
        self.handle = Some(handle);
    }

    /// Aborts the running task. Returns false when nothing was running.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.stop();
    }
}
