//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Logger initialization (console + optional file)
//! - Service configuration summary at startup

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config::ClientConfig;

/// Initialize logger for console output and, when a path is given, a log file.
///
/// # Arguments
/// * `log_file_path` - Optional path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger was already set
pub fn init_logger(log_file_path: Option<&str>) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file_path {
        let log_file = File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective service configuration at application startup
pub fn log_service_configuration(config: &ClientConfig) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("🎬 Download service configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("   Service URL:     {}", config.service_url);
    log::info!("   Poll interval:   {:?}", config.poll_interval);
    log::info!("   Request timeout: {:?}", config.request_timeout);

    if config.service_url.scheme() != "https" && !is_local(&config.service_url) {
        log::warn!("⚠️  Service is reached over plain HTTP on a non-local host");
    }
}

fn is_local(url: &url::Url) -> bool {
    matches!(url.host_str(), Some("localhost") | Some("127.0.0.1") | Some("::1") | Some("[::1]"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn test_init_logger_creates_log_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("vidfetch.log");
        assert!(!log_path.exists());

        // The file is created before the global logger is installed, so this
        // holds even if another test installed one first.
        let _ = init_logger(Some(log_path.to_str().unwrap()));
        assert!(log_path.exists());
    }

    #[test]
    fn test_init_logger_reports_unwritable_path() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("missing").join("vidfetch.log");

        let err = init_logger(Some(log_path.to_str().unwrap())).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create log file"));
    }

    #[test]
    fn test_is_local() {
        assert!(is_local(&url::Url::parse("http://localhost:5000/").unwrap()));
        assert!(is_local(&url::Url::parse("http://127.0.0.1:5000/").unwrap()));
        assert!(!is_local(&url::Url::parse("http://example.com/").unwrap()));
    }
}
