//! Terminal presenter for the command-line front-end.

use url::Url;

use crate::session::presenter::{PlainTextFormatter, Presenter, StateFormatter};
use crate::session::state::SessionState;

/// Prints the session to stdout, skipping renders that would repeat the last
/// output.
pub struct TerminalPresenter<F: StateFormatter = PlainTextFormatter> {
    formatter: F,
    last_output: Option<String>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::with_formatter(PlainTextFormatter)
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: StateFormatter> TerminalPresenter<F> {
    pub fn with_formatter(formatter: F) -> Self {
        Self {
            formatter,
            last_output: None,
        }
    }

    /// Formats `state` and returns the text only when it differs from the
    /// previous render.
    fn changed_output(&mut self, state: &SessionState) -> Option<String> {
        let text = self.formatter.format(state);
        if self.last_output.as_deref() == Some(text.as_str()) {
            return None;
        }
        self.last_output = Some(text.clone());
        Some(text)
    }
}

impl<F: StateFormatter> Presenter for TerminalPresenter<F> {
    fn render(&mut self, state: &SessionState) {
        if let Some(text) = self.changed_output(state) {
            println!("{}\n", text);
        }
    }

    fn open_artifact(&mut self, url: &Url) {
        println!("📥 File ready: {}", url);
    }
}
