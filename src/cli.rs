use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vidfetch")]
#[command(author, version, about = "Fetch YouTube videos through a download job service", long_about = None)]
pub struct Cli {
    /// Base URL of the job service (overrides VIDFETCH_SERVICE_URL)
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a URL is a supported YouTube link
    Check {
        /// URL to check
        url: String,
    },

    /// Show video details
    Info {
        /// YouTube URL
        url: String,

        /// Print the raw details as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start a download job and follow it until it completes
    Download {
        /// YouTube URL
        url: String,

        /// Quality to request ("best" or one of the listed qualities, e.g. 720p)
        #[arg(short, long, default_value = "best")]
        quality: String,

        /// Download audio only (MP3)
        #[arg(short, long)]
        audio: bool,

        /// Save the finished file to this path
        #[arg(short, long)]
        save: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_download_defaults() {
        let cli = Cli::try_parse_from(["vidfetch", "download", "https://youtu.be/dQw4w9WgXcQ"]).unwrap();
        match cli.command {
            Commands::Download {
                url,
                quality,
                audio,
                save,
            } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(quality, "best");
                assert!(!audio);
                assert_eq!(save, None);
            }
            _ => panic!("expected download command"),
        }
        assert_eq!(cli.service_url, None);
    }

    #[test]
    fn test_parse_global_service_url() {
        let cli = Cli::try_parse_from([
            "vidfetch",
            "info",
            "https://youtu.be/dQw4w9WgXcQ",
            "--json",
            "--service-url",
            "http://10.0.0.2:5000",
        ])
        .unwrap();
        assert_eq!(cli.service_url.as_deref(), Some("http://10.0.0.2:5000"));
        assert!(matches!(cli.command, Commands::Info { json: true, .. }));
    }
}
