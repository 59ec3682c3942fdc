//! Core utilities, configuration, errors, and formatting

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod validation;

// Re-exports for convenience
pub use config::ClientConfig;
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_service_configuration};
pub use validation::ValidationError;
