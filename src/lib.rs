//! Vidfetch - client for a YouTube download job service
//!
//! This library drives a download page against a remote service that extracts
//! video metadata, runs download jobs, and serves the finished files.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, URL validation and formatting
//! - `service`: The `JobService` trait, wire types and the HTTP client
//! - `session`: View state, the pure state machine, polling and the controller
//! - `cli` / `terminal`: Command-line front-end

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod core;
pub mod service;
pub mod session;
pub mod terminal;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult, ClientConfig};
pub use service::{HttpJobService, JobId, JobService, JobStatus, ProgressSnapshot, VideoInfo};
pub use session::{DownloadKind, DownloadSessionController, Presenter, SessionState, View};
