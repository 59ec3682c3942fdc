//! Rendering adapter between the session controller and whatever shows it.
//!
//! The controller calls [`Presenter::render`] after every transition with the full
//! state, and [`Presenter::open_artifact`] when the user asks for the finished file.
//! [`StateFormatter`] turns a state into text for presenters that draw text.

use url::Url;

use crate::core::format::{format_count, format_duration};
use crate::session::machine::JOB_FAILED_MESSAGE;
use crate::session::state::{Busy, SessionState, View};

// ============================================================================
// Presenter
// ============================================================================

/// Receives view updates from the controller.
pub trait Presenter: Send {
    /// Draws `state`. Called once per dispatched event.
    fn render(&mut self, state: &SessionState);

    /// Offers the artifact at `url` to the user.
    fn open_artifact(&mut self, url: &Url);
}

/// Presenter that ignores everything (headless use and tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _state: &SessionState) {}

    fn open_artifact(&mut self, _url: &Url) {}
}

// ============================================================================
// State Formatter
// ============================================================================

/// Width of the text progress bar in cells.
const PROGRESS_BAR_WIDTH: usize = 20;

/// Formats a session state for display.
pub trait StateFormatter: Send + Sync {
    fn format(&self, state: &SessionState) -> String;
}

/// Plain text formatter (terminal and logs).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormatter;

impl StateFormatter for PlainTextFormatter {
    fn format(&self, state: &SessionState) -> String {
        let mut lines = match state.view {
            View::Idle => idle_lines(state),
            View::InfoDisplayed => info_lines(state),
            View::Progress => progress_lines(state),
            View::Complete => vec!["✅ Download complete".to_string()],
            View::Error => vec![format!(
                "❌ {}",
                state.error_message.as_deref().unwrap_or(JOB_FAILED_MESSAGE)
            )],
        };

        if let Some(busy) = state.busy {
            lines.push(
                match busy {
                    Busy::FetchingInfo => "⏳ Getting video info...",
                    Busy::StartingJob => "⏳ Starting download...",
                }
                .to_string(),
            );
        }

        lines.join("\n")
    }
}

fn idle_lines(state: &SessionState) -> Vec<String> {
    let mut lines = vec!["🔗 Enter a YouTube URL".to_string()];
    if let Some(message) = &state.url_message {
        lines.push(format!("⚠️ {}", message));
    }
    lines
}

fn info_lines(state: &SessionState) -> Vec<String> {
    let Some(info) = &state.info else {
        return idle_lines(state);
    };

    let mut lines = vec![
        format!("🎬 {}", info.title),
        format!("👤 {}", info.uploader),
        format!(
            "👁 {} views · ⏱ {}",
            format_count(info.view_count),
            format_duration(info.duration)
        ),
    ];

    if state.quality_visible {
        let labels: Vec<String> = info.quality_options().into_iter().map(|option| option.label).collect();
        lines.push(format!("Quality: {}", labels.join(", ")));
    } else {
        lines.push("Audio only (MP3)".to_string());
    }

    if let Some(message) = &state.url_message {
        lines.push(format!("⚠️ {}", message));
    }
    if let Some(error) = &state.inline_error {
        lines.push(format!("❌ {}", error));
    }
    lines
}

fn progress_lines(state: &SessionState) -> Vec<String> {
    let progress = &state.progress;
    let mut lines = vec![format!(
        "⬇️ Downloading {} {}",
        progress_bar(progress.percent),
        progress.percent_text
    )];

    match &progress.speed_text {
        Some(speed) => lines.push(format!("{} · {}", speed, progress.detail_text)),
        None => lines.push(progress.detail_text.clone()),
    }
    lines
}

/// Draws `[████░░░░]` for a percentage in 0..=100.
fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}
