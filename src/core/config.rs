use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

use crate::core::error::AppResult;

/// Base URL of the download job service
/// Read once from VIDFETCH_SERVICE_URL environment variable
/// Default: http://127.0.0.1:5000 (the service's own default port)
pub static SERVICE_URL: Lazy<String> = Lazy::new(|| {
    env::var("VIDFETCH_SERVICE_URL")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string())
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Unset means console logging only
pub static LOG_FILE_PATH: Lazy<Option<String>> =
    Lazy::new(|| env::var("LOG_FILE_PATH").ok().filter(|value| !value.trim().is_empty()));

/// Progress polling configuration
pub mod polling {
    use super::Duration;
    use once_cell::sync::Lazy;
    use std::env;

    /// Interval between progress requests (in milliseconds)
    pub const INTERVAL_MS: u64 = 1000;

    /// Poll interval, overridable through VIDFETCH_POLL_INTERVAL_MS
    pub static INTERVAL: Lazy<Duration> = Lazy::new(|| {
        let millis = env::var("VIDFETCH_POLL_INTERVAL_MS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|millis| *millis > 0)
            .unwrap_or(INTERVAL_MS);
        Duration::from_millis(millis)
    });

    /// Poll interval duration
    pub fn interval() -> Duration {
        *INTERVAL
    }
}

/// Network configuration
pub mod network {
    use super::Duration;
    use once_cell::sync::Lazy;
    use std::env;

    /// Request timeout for service calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout, overridable through VIDFETCH_REQUEST_TIMEOUT_SECS
    pub static TIMEOUT: Lazy<Duration> = Lazy::new(|| {
        let secs = env::var("VIDFETCH_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    });

    /// Request timeout duration
    pub fn timeout() -> Duration {
        *TIMEOUT
    }
}

/// Settings a controller and its service client are built from.
///
/// Controllers receive this explicitly instead of reading the statics above, so
/// tests can build as many independent instances as they like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the job service; endpoint paths are joined onto it
    pub service_url: url::Url,
    /// Cadence of progress polling while a job is running
    pub poll_interval: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Builds a config for `service_url` with the default cadence and timeout.
    pub fn new(service_url: &str) -> AppResult<Self> {
        Ok(Self {
            service_url: parse_base_url(service_url)?,
            poll_interval: Duration::from_millis(polling::INTERVAL_MS),
            request_timeout: Duration::from_secs(network::REQUEST_TIMEOUT_SECS),
        })
    }

    /// Builds a config from the environment (see the statics in this module).
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            service_url: parse_base_url(&SERVICE_URL)?,
            poll_interval: polling::interval(),
            request_timeout: network::timeout(),
        })
    }

    /// Overrides the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Parses a base URL, forcing a trailing slash so `Url::join` keeps any path prefix.
fn parse_base_url(raw: &str) -> AppResult<url::Url> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Ok(url::Url::parse(raw)?)
    } else {
        Ok(url::Url::parse(&format!("{}/", raw))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_cadence() {
        let config = ClientConfig::new("http://localhost:5000").unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.service_url.as_str(), "http://localhost:5000/");
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let config = ClientConfig::new("https://example.com/yt").unwrap();
        let joined = config.service_url.join("get_info").unwrap();
        assert_eq!(joined.as_str(), "https://example.com/yt/get_info");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ClientConfig::new("not a url").is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("http://localhost:5000")
            .unwrap()
            .with_poll_interval(Duration::from_millis(10))
            .with_request_timeout(Duration::from_secs(2));
        assert_eq!(config.poll_interval, Duration::from_millis(10));
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }
}
