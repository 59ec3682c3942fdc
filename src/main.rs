use anyhow::Result;
use dotenvy::dotenv;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;

use vidfetch::cli::{Cli, Commands};
use vidfetch::core::format::format_bytes;
use vidfetch::core::validation::{extract_video_id, validate_youtube_url};
use vidfetch::core::{config, init_logger, log_service_configuration, AppError, ClientConfig};
use vidfetch::service::HttpJobService;
use vidfetch::session::machine::JOB_FAILED_MESSAGE;
use vidfetch::session::presenter::{NullPresenter, Presenter};
use vidfetch::session::{DownloadKind, DownloadSessionController, View};
use vidfetch::terminal::TerminalPresenter;

/// Main entry point for the command-line client
///
/// Parses CLI arguments and dispatches to the requested subcommand.
///
/// # Errors
/// Returns an error if initialization fails or the requested operation fails.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    let cli = Cli::parse_args();

    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    init_logger(config::LOG_FILE_PATH.as_deref())?;

    match cli.command {
        Commands::Check { url } => run_check(&url),
        Commands::Info { url, json } => {
            let config = load_config(cli.service_url.as_deref())?;
            run_info(&config, &url, json).await
        }
        Commands::Download {
            url,
            quality,
            audio,
            save,
        } => {
            let config = load_config(cli.service_url.as_deref())?;
            log_service_configuration(&config);
            run_download(&config, &url, &quality, audio, save.as_deref()).await
        }
    }
}

/// Environment configuration, with the service URL replaced by `--service-url`
fn load_config(service_url: Option<&str>) -> Result<ClientConfig> {
    let env_config = ClientConfig::from_env()?;
    match service_url {
        Some(url) => Ok(ClientConfig::new(url)?
            .with_poll_interval(env_config.poll_interval)
            .with_request_timeout(env_config.request_timeout)),
        None => Ok(env_config),
    }
}

/// Run the check command
fn run_check(url: &str) -> Result<()> {
    validate_youtube_url(url)?;
    match extract_video_id(url) {
        Some(video_id) => println!("✅ Valid YouTube URL (video id: {})", video_id),
        None => println!("✅ Valid YouTube URL"),
    }
    Ok(())
}

/// Run the info command
async fn run_info(config: &ClientConfig, url: &str, json: bool) -> Result<()> {
    let service = Arc::new(HttpJobService::new(config)?);
    let presenter: Box<dyn Presenter> = if json {
        Box::new(NullPresenter)
    } else {
        Box::new(TerminalPresenter::new())
    };
    let mut controller = DownloadSessionController::new(service, presenter, config);

    let info = controller.fetch_video_info(url).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    }
    Ok(())
}

/// Run the download command
///
/// Fetches the details, starts the job and follows it until it completes or
/// fails. Ctrl-C drops the job and resets the session.
async fn run_download(
    config: &ClientConfig,
    url: &str,
    quality: &str,
    audio: bool,
    save: Option<&str>,
) -> Result<()> {
    let service = Arc::new(HttpJobService::new(config)?);
    let mut controller =
        DownloadSessionController::new(service.clone(), Box::new(TerminalPresenter::new()), config);

    let info = controller.fetch_video_info(url).await?;

    let kind = if audio { DownloadKind::Audio } else { DownloadKind::Video };
    controller.toggle_quality_visibility(kind);
    if !audio && !info.offers_quality(quality) {
        log::warn!("Quality {} is not listed for this video, requesting it anyway", quality);
    }

    let job_id = controller.start_download(url, quality, audio).await?;

    let cancelled = tokio::select! {
        _ = controller.run_until_settled() => false,
        _ = signal::ctrl_c() => true,
    };

    if cancelled {
        log::info!("Interrupted, abandoning job {}", job_id);
        controller.reset_to_idle();
        return Err(anyhow::anyhow!("Download cancelled"));
    }

    match controller.view() {
        View::Complete => {
            controller.fetch_result_file()?;
            if let Some(path) = save {
                let written = service.save_artifact(&job_id, Path::new(path)).await?;
                println!("💾 Saved {} to {}", format_bytes(written), path);
            }
            Ok(())
        }
        View::Error => {
            let message = controller
                .state()
                .error_message
                .clone()
                .unwrap_or_else(|| JOB_FAILED_MESSAGE.to_string());
            Err(AppError::Job(message).into())
        }
        other => Err(anyhow::anyhow!("Download stopped in the {} view", other.as_str())),
    }
}
