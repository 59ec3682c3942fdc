//! Mock implementations for controller tests
//!
//! This module provides a scripted `JobService` so controller flows can be
//! tested without a network.

pub mod mock_service;

pub use mock_service::{MockJobService, ServiceCall};
