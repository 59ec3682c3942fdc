//! View state owned by the session controller.
//!
//! `SessionState` is a plain value: the state machine consumes one and returns the
//! next, presenters only ever read it.

use crate::core::format::{format_bytes, format_eta, format_percent, format_speed};
use crate::service::types::{JobId, ProgressSnapshot, VideoInfo};

/// Detail line shown right after a job starts.
pub const INITIAL_PROGRESS_DETAIL: &str = "Initializing download...";

/// Which section of the page is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Initial view: only the URL form
    #[default]
    Idle,
    /// Video details and download options
    InfoDisplayed,
    /// A job is running and being polled
    Progress,
    /// The job finished; the artifact can be fetched
    Complete,
    /// The job failed or progress could not be tracked
    Error,
}

impl View {
    /// Video details can only be (re)loaded before a job is started
    pub fn accepts_info(self) -> bool {
        matches!(self, View::Idle | View::InfoDisplayed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Idle => "idle",
            View::InfoDisplayed => "info_displayed",
            View::Progress => "progress",
            View::Complete => "complete",
            View::Error => "error",
        }
    }
}

/// What the user asked to download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadKind {
    #[default]
    Video,
    Audio,
}

impl DownloadKind {
    /// Quality selection only applies to video downloads
    pub fn shows_quality(self) -> bool {
        matches!(self, DownloadKind::Video)
    }
}

/// Request currently in flight (spinner on the triggering control)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    FetchingInfo,
    StartingJob,
}

/// Job tracked by the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedJob {
    pub id: JobId,
    /// Set once a finished/error result arrived; later results are ignored
    pub terminal: bool,
}

/// Progress section contents
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressDisplay {
    pub percent: f64,
    pub percent_text: String,
    pub speed_text: Option<String>,
    pub detail_text: String,
}

impl Default for ProgressDisplay {
    fn default() -> Self {
        Self {
            percent: 0.0,
            percent_text: format_percent(0.0),
            speed_text: None,
            detail_text: INITIAL_PROGRESS_DETAIL.to_string(),
        }
    }
}

impl ProgressDisplay {
    /// Applies a "downloading" snapshot.
    ///
    /// Speed and detail keep their previous text when the snapshot has nothing
    /// to replace them with. ETA wins over byte counts.
    pub fn apply(&mut self, snapshot: &ProgressSnapshot) {
        self.percent = snapshot.percent.clamp(0.0, 100.0);
        self.percent_text = format_percent(self.percent);

        if let Some(speed) = snapshot.speed() {
            self.speed_text = Some(format_speed(speed));
        }

        if let Some(eta) = snapshot.eta() {
            self.detail_text = format!("ETA: {}", format_eta(eta));
        } else if let Some((downloaded, total)) = snapshot.byte_counts() {
            self.detail_text = format!("{} / {}", format_bytes(downloaded), format_bytes(total));
        }
    }
}

/// Everything the presentation layer needs to draw the page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub view: View,
    /// Current contents of the URL field (trimmed)
    pub url_input: String,
    /// Validation / info-request message under the URL field
    pub url_message: Option<String>,
    pub info: Option<VideoInfo>,
    pub kind: DownloadKind,
    pub quality_visible: bool,
    pub busy: Option<Busy>,
    /// Job-start failure shown next to the download button
    pub inline_error: Option<String>,
    pub job: Option<TrackedJob>,
    pub progress: ProgressDisplay,
    /// Message of the error view
    pub error_message: Option<String>,
}

impl SessionState {
    /// Id of the job held by the session, terminal or not
    pub fn job_id(&self) -> Option<&JobId> {
        self.job.as_ref().map(|job| &job.id)
    }

    /// True while `job_id` is the session's job and no terminal result arrived yet
    pub fn is_tracking(&self, job_id: &JobId) -> bool {
        self.job.as_ref().is_some_and(|job| &job.id == job_id && !job.terminal)
    }

    /// Whether a polling task should exist right now
    pub fn wants_polling(&self) -> bool {
        self.view == View::Progress && self.job.as_ref().is_some_and(|job| !job.terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::types::JobStatus;

    fn downloading(percent: f64) -> ProgressSnapshot {
        ProgressSnapshot::new(JobStatus::Downloading, percent)
    }

    #[test]
    fn test_initial_progress() {
        let display = ProgressDisplay::default();
        assert_eq!(display.percent_text, "0%");
        assert_eq!(display.speed_text, None);
        assert_eq!(display.detail_text, INITIAL_PROGRESS_DETAIL);
    }

    #[test]
    fn test_eta_wins_over_byte_counts() {
        let mut snapshot = downloading(42.0);
        snapshot.eta = Some(30);
        snapshot.downloaded = Some(1536);
        snapshot.total = Some(1_048_576);

        let mut display = ProgressDisplay::default();
        display.apply(&snapshot);
        assert_eq!(display.percent_text, "42%");
        assert_eq!(display.detail_text, "ETA: 30s");
    }

    #[test]
    fn test_byte_counts_without_eta() {
        let mut snapshot = downloading(10.0);
        snapshot.downloaded = Some(1536);
        snapshot.total = Some(1_048_576);
        snapshot.speed = Some(2048.0);

        let mut display = ProgressDisplay::default();
        display.apply(&snapshot);
        assert_eq!(display.detail_text, "1.5 KB / 1 MB");
        assert_eq!(display.speed_text.as_deref(), Some("2 KB/s"));
    }

    #[test]
    fn test_missing_fields_keep_previous_text() {
        let mut first = downloading(10.0);
        first.speed = Some(1024.0);
        first.eta = Some(90);

        let mut display = ProgressDisplay::default();
        display.apply(&first);
        display.apply(&downloading(20.0));

        assert_eq!(display.percent_text, "20%");
        assert_eq!(display.speed_text.as_deref(), Some("1 KB/s"));
        assert_eq!(display.detail_text, "ETA: 1m 30s");
    }

    #[test]
    fn test_tracking() {
        let mut state = SessionState::default();
        let id = JobId::new("a");
        assert!(!state.is_tracking(&id));

        state.job = Some(TrackedJob {
            id: id.clone(),
            terminal: false,
        });
        state.view = View::Progress;
        assert!(state.is_tracking(&id));
        assert!(!state.is_tracking(&JobId::new("b")));
        assert!(state.wants_polling());

        state.job.as_mut().unwrap().terminal = true;
        assert!(!state.is_tracking(&id));
        assert!(!state.wants_polling());
    }
}
