//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fixtures;
pub mod presenter;

#[allow(unused_imports)]
pub use fixtures::{sample_info, snapshot, test_config, VALID_URL};
#[allow(unused_imports)]
pub use presenter::{PresenterLog, RecordingPresenter};
