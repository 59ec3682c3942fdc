use thiserror::Error;

use crate::core::validation::ValidationError;

/// Centralized error type for the session controller and the job service client.
///
/// Every failure a caller can observe is one of these variants. The first four map
/// one-to-one onto how the controller surfaces them: validation problems stay local,
/// service and network errors become an inline message, job errors move the view to
/// the error state.
///
/// # Example
///
/// ```
/// use vidfetch::core::error::AppError;
///
/// let err = AppError::service("quota exceeded");
/// assert_eq!(err.to_string(), "quota exceeded");
/// assert_eq!(err.category(), "service");
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad or missing URL; never reaches the service
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service answered with a structured `{error}` payload
    #[error("{message}")]
    Service { message: String },

    /// Transport failure or an unreadable response body
    #[error("{0}")]
    Network(String),

    /// Terminal `error` status reported by a progress poll
    #[error("{0}")]
    Job(String),

    /// A download is already being tracked by this controller
    #[error("A download is already in progress")]
    DownloadInProgress,

    /// The action is not available from the current view
    #[error("Cannot {action} from the {view} view")]
    InvalidTransition { action: &'static str, view: &'static str },

    /// Service base URL or endpoint could not be built
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Local IO errors (saving an artifact)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Builds a service error from a message
    pub fn service(message: impl Into<String>) -> Self {
        AppError::Service {
            message: message.into(),
        }
    }

    /// Short label for log lines
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Service { .. } => "service",
            AppError::Network(_) => "network",
            AppError::Job(_) => "job",
            AppError::DownloadInProgress => "busy",
            AppError::InvalidTransition { .. } => "state",
            AppError::Url(_) => "url",
            AppError::Io(_) => "io",
        }
    }

    /// Whether the failure happened on the wire rather than in the service
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Network(format!("Invalid response from service: {}", err))
        } else {
            AppError::Network(format!("Network error: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display_is_the_bare_message() {
        let err = AppError::service("quota exceeded");
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: AppError = ValidationError::InvalidUrl.into();
        assert_eq!(err.to_string(), "Please enter a valid YouTube URL");
        assert_eq!(err.category(), "validation");
    }

    #[test]
    fn test_categories() {
        assert_eq!(AppError::Network("x".into()).category(), "network");
        assert_eq!(AppError::Job("x".into()).category(), "job");
        assert_eq!(AppError::DownloadInProgress.category(), "busy");
        let err = AppError::InvalidTransition {
            action: "start a download",
            view: "idle",
        };
        assert_eq!(err.category(), "state");
        assert_eq!(err.to_string(), "Cannot start a download from the idle view");
        assert!(AppError::Network("x".into()).is_network());
        assert!(!AppError::service("x").is_network());
    }
}
