//! Presenter that records everything it is asked to show

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use url::Url;

use vidfetch::session::presenter::{PlainTextFormatter, Presenter, StateFormatter};
use vidfetch::session::SessionState;

#[derive(Debug, Default)]
struct Recorded {
    states: Vec<SessionState>,
    artifacts: Vec<Url>,
}

/// Read side of a [`RecordingPresenter`], kept by the test
#[derive(Debug, Clone, Default)]
pub struct PresenterLog {
    inner: Arc<Mutex<Recorded>>,
}

impl PresenterLog {
    pub fn states(&self) -> Vec<SessionState> {
        self.inner.lock().unwrap().states.clone()
    }

    pub fn last_state(&self) -> Option<SessionState> {
        self.inner.lock().unwrap().states.last().cloned()
    }

    /// Every render, formatted as plain text
    pub fn texts(&self) -> Vec<String> {
        self.states().iter().map(|state| PlainTextFormatter.format(state)).collect()
    }

    pub fn artifacts(&self) -> Vec<Url> {
        self.inner.lock().unwrap().artifacts.clone()
    }
}

/// Presenter handed to the controller
pub struct RecordingPresenter {
    log: PresenterLog,
}

impl RecordingPresenter {
    pub fn new() -> (Self, PresenterLog) {
        let log = PresenterLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, state: &SessionState) {
        self.log.inner.lock().unwrap().states.push(state.clone());
    }

    fn open_artifact(&mut self, url: &Url) {
        self.log.inner.lock().unwrap().artifacts.push(url.clone());
    }
}
